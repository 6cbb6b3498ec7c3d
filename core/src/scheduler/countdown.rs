use chrono::{DateTime, Utc};

use crate::model::task::Task;
use crate::time::format_hms;

/// The near-due warning fires when remaining time drops to 1/20th (5%) of the
/// window observed when the countdown started. A countdown started mid-window
/// (after a restart) gets a proportionally smaller warning window.
const WARN_WINDOW_DIVISOR: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Warned,
    Expired,
}

/// Outcome of a single countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; display is zero-padded `HH:MM:SS`.
    Remaining { display: String },
    /// Crossed into the warning window. Fires at most once per countdown.
    Warn { display: String },
    /// Due time passed. Terminal; no further ticks change anything.
    Expired,
}

/// Per-task countdown state machine. Pure: the caller supplies `now` on every
/// tick, the timer loop lives in the registry. External cancellation is the
/// registry's business too; the machine itself only runs forward.
#[derive(Debug, Clone)]
pub struct Countdown {
    due_time: DateTime<Utc>,
    warn_threshold_ms: i64,
    phase: Phase,
}

impl Countdown {
    /// Captures the due instant and the warning threshold. The threshold is
    /// computed once, from the duration remaining *now*, not from the task's
    /// original full window.
    pub fn begin(task: &Task, now: DateTime<Utc>) -> Self {
        let total_ms = (task.due_time() - now).num_milliseconds();
        Self {
            due_time: task.due_time(),
            warn_threshold_ms: total_ms / WARN_WINDOW_DIVISOR,
            phase: Phase::Running,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        let ms_left = (self.due_time - now).num_milliseconds();
        if ms_left <= 0 {
            self.phase = Phase::Expired;
            return Tick::Expired;
        }

        let display = format_hms(ms_left);
        if self.phase == Phase::Running && ms_left <= self.warn_threshold_ms {
            self.phase = Phase::Warned;
            return Tick::Warn { display };
        }
        Tick::Remaining { display }
    }
}
