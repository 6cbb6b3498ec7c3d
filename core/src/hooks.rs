//! Collaborator interfaces. The core never renders, animates or prompts by
//! itself; the embedding layer supplies these and the core calls into them.

use uuid::Uuid;

/// Countdown display state delivered on every scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickView {
    /// Still counting; zero-padded `HH:MM:SS`.
    Remaining(String),
    /// Due time passed. Terminal.
    Overdue,
}

/// Rendering hook the scheduler drives once per tick per active countdown.
pub trait TickSink: Send + Sync {
    fn render(&self, task_id: Uuid, label: &str, view: TickView);
}

/// Notification channel for near-due warnings, the periodic incomplete-task
/// reminder, and validation messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// One-shot celebration effect, triggered on task completion.
pub trait Celebrate {
    fn celebrate(&self);
}

/// Explicit boolean confirmation before a destructive action proceeds.
pub trait ConfirmPrompt {
    fn confirm(&self, question: &str) -> bool;
}
