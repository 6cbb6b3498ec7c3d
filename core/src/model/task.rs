use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item with a due window that starts at creation time.
///
/// The persisted field names keep the historical camelCase layout so existing
/// slots keep loading. `id` was added later as the countdown registry key;
/// payloads written before it existed get a fresh one on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    pub is_done: bool,
    pub due_in_minutes: i64,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String, due_in_minutes: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            is_done: false,
            due_in_minutes,
            created_at,
        }
    }

    /// Due instant, derived from `created_at` and the minute offset.
    /// Never stored; the rendered countdown string is derived-only as well.
    pub fn due_time(&self) -> DateTime<Utc> {
        self.created_at + Duration::minutes(self.due_in_minutes)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_done && now >= self.due_time()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_due_time_is_created_at_plus_offset() {
        let task = Task::new("Write report".to_string(), 10, t0());
        assert_eq!(task.due_time(), t0() + Duration::minutes(10));
        assert!(!task.is_overdue(t0() + Duration::minutes(9)));
        assert!(task.is_overdue(t0() + Duration::minutes(10)));
    }

    #[test]
    fn test_serializes_with_camel_case_layout() {
        let task = Task::new("Write report".to_string(), 10, t0());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["text"], "Write report");
        assert_eq!(json["isDone"], false);
        assert_eq!(json["dueInMinutes"], 10);
        assert_eq!(json["createdAt"], "2025-06-01T12:00:00Z");
        assert!(json.get("id").is_some());
    }

    #[test]
    fn test_legacy_payload_without_id_gets_one() {
        let payload =
            r#"{"text":"Write report","isDone":false,"dueInMinutes":10,"createdAt":"2025-06-01T12:00:00Z"}"#;
        let task: Task = serde_json::from_str(payload).unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.due_in_minutes, 10);
        assert!(!task.id.is_nil());
    }
}
