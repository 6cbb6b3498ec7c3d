use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::hooks::Notifier;
use crate::repository::traits::StorageSlot;
use crate::service::store::decode_tasks;

/// Default reminder period: once an hour.
pub const REMINDER_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Spawns the recurring incomplete-task reminder. Deliberately independent of
/// the live store: each firing re-reads the durable slot and sees whatever was
/// last persisted. The first firing comes one full period after start.
pub fn spawn_reminder<S>(
    slot: Arc<S>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: StorageSlot + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => {
                    let payload = match slot.read() {
                        Ok(payload) => payload,
                        Err(err) => {
                            debug!(error = %err, "reminder skipped, slot unreadable");
                            continue;
                        }
                    };
                    let incomplete = decode_tasks(payload.as_deref())
                        .iter()
                        .filter(|t| !t.is_done)
                        .count();
                    if incomplete > 0 {
                        notifier.notify(&format!(
                            "⏰ Reminder: You have {incomplete} incomplete task(s)!"
                        ));
                    }
                }
            }
        }
    })
}
