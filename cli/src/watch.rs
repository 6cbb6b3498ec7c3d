use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use duetick_core::{spawn_reminder, FileSlot, Scheduler, TaskStore, REMINDER_PERIOD};

use crate::render::{ConsoleNotifier, CountdownBoard};

/// Live countdown view: one ticking line per pending task, plus the recurring
/// incomplete-task reminder. Runs until Ctrl-C.
pub async fn run(slot: FileSlot) -> Result<()> {
    let store = TaskStore::load(slot.clone());
    if store.tasks().is_empty() {
        println!("No tasks to watch.");
        return Ok(());
    }

    let (done, total) = store.progress();
    println!(
        "Watching {} pending task(s) ({done} / {total} done). Ctrl-C to exit.",
        store.incomplete_count()
    );

    let board = Arc::new(CountdownBoard::new());
    let notifier = Arc::new(ConsoleNotifier);
    let mut scheduler = Scheduler::new(board, notifier.clone());
    scheduler.start_all(store.tasks()).await;

    let reminder_cancel = CancellationToken::new();
    let reminder = spawn_reminder(
        Arc::new(slot),
        notifier,
        REMINDER_PERIOD,
        reminder_cancel.clone(),
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to wait for Ctrl-C");
    }

    reminder_cancel.cancel();
    let _ = reminder.await;
    scheduler.stop_all().await;
    println!();
    Ok(())
}
