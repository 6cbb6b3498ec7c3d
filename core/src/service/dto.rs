use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::task::Task;
use crate::time::format_hms;

/// Flattened task view for list-style rendering: identity, label, state and a
/// derived remaining/overdue display. Display strings are never parsed back.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: Uuid,
    pub text: String,
    pub is_done: bool,
    pub due_time: DateTime<Utc>,
    pub remaining: String,
}

impl TaskRow {
    pub fn from_entity(task: &Task, now: DateTime<Utc>) -> Self {
        let ms_left = (task.due_time() - now).num_milliseconds();
        let remaining = if task.is_done {
            "-".to_string()
        } else if ms_left <= 0 {
            "⏰ Overdue!".to_string()
        } else {
            format_hms(ms_left)
        };

        Self {
            id: task.id,
            text: task.text.clone(),
            is_done: task.is_done,
            due_time: task.due_time(),
            remaining,
        }
    }
}
