use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::hooks::{Notifier, TickSink, TickView};
use crate::model::task::Task;
use crate::scheduler::countdown::{Countdown, Tick};
use crate::time::{Clock, SystemClock};

const TICK_PERIOD: Duration = Duration::from_secs(1);

struct CountdownHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Keyed registry of active countdowns: at most one per task id. Owns the
/// cooperative timer loops; completion and deletion cancel through [`stop`].
///
/// The registry only reads task due data at start time. It never mutates the
/// store; the embedding layer coordinates both sides.
///
/// [`stop`]: Scheduler::stop
pub struct Scheduler {
    active: HashMap<Uuid, CountdownHandle>,
    sink: Arc<dyn TickSink>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl Scheduler {
    pub fn new(sink: Arc<dyn TickSink>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_clock(sink, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(
        sink: Arc<dyn TickSink>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            active: HashMap::new(),
            sink,
            notifier,
            clock,
        }
    }

    /// Starts a countdown for the task, first cancelling any countdown already
    /// registered under the same id. A task already past due expires on the
    /// first tick.
    pub async fn start(&mut self, task: &Task) {
        self.stop(task.id).await;

        let countdown = Countdown::begin(task, self.clock.now());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_countdown(
            countdown,
            task.id,
            task.text.clone(),
            self.sink.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            cancel.clone(),
        ));
        info!(task_id = %task.id, text = %task.text, "countdown started");
        self.active.insert(task.id, CountdownHandle { cancel, handle });
    }

    /// Load-on-start path: one countdown per not-done task, in order.
    pub async fn start_all(&mut self, tasks: &[Task]) {
        for task in tasks.iter().filter(|t| !t.is_done) {
            self.start(task).await;
        }
    }

    /// Cancels the countdown registered under `id` and waits for its loop to
    /// wind down. No-op when nothing is registered; returns whether a
    /// countdown was present.
    pub async fn stop(&mut self, id: Uuid) -> bool {
        let Some(entry) = self.active.remove(&id) else {
            return false;
        };
        entry.cancel.cancel();
        let _ = entry.handle.await;
        debug!(task_id = %id, "countdown stopped");
        true
    }

    pub async fn stop_all(&mut self) {
        let ids: Vec<Uuid> = self.active.keys().copied().collect();
        for id in ids {
            self.stop(id).await;
        }
    }

    /// Registered countdown slots. An expired loop stays registered until
    /// stopped or replaced, mirroring the original timer map.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_registered(&self, id: Uuid) -> bool {
        self.active.contains_key(&id)
    }
}

async fn run_countdown(
    mut countdown: Countdown,
    id: Uuid,
    label: String,
    sink: Arc<dyn TickSink>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    cancel: CancellationToken,
) {
    let mut ticker = interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        // Cancellation wins over a due tick so a stopped countdown never
        // renders again.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return;
            }
            _ = ticker.tick() => {
                match countdown.tick(clock.now()) {
                    Tick::Remaining { display } => {
                        sink.render(id, &label, TickView::Remaining(display));
                    }
                    Tick::Warn { display } => {
                        notifier.notify(&format!("⚠ Only 5% time left for task: \"{label}\""));
                        sink.render(id, &label, TickView::Remaining(display));
                    }
                    Tick::Expired => {
                        info!(task_id = %id, text = %label, "task overdue");
                        sink.render(id, &label, TickView::Overdue);
                        return;
                    }
                }
            }
        }
    }
}
