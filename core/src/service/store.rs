use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::task::Task;
use crate::repository::traits::StorageSlot;

/// Decodes a serialized task collection, treating missing or corrupt payloads
/// as an empty list. The slot is the sole source of truth on startup, but a
/// bad payload must never prevent the program from starting.
pub fn decode_tasks(payload: Option<&str>) -> Vec<Task> {
    let Some(payload) = payload else {
        return Vec::new();
    };
    match serde_json::from_str(payload) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(error = %err, "task slot holds unparseable data, starting empty");
            Vec::new()
        }
    }
}

/// Owns the authoritative in-memory task list and its persistence. Every
/// mutating operation re-serializes the full collection into the slot;
/// insertion order is preserved end to end.
pub struct TaskStore<S: StorageSlot> {
    slot: S,
    tasks: Vec<Task>,
}

impl<S: StorageSlot> TaskStore<S> {
    /// Loads the persisted collection. Read failures and corrupt payloads are
    /// recovered as an empty collection, never surfaced.
    pub fn load(slot: S) -> Self {
        let tasks = match slot.read() {
            Ok(payload) => decode_tasks(payload.as_deref()),
            Err(err) => {
                warn!(error = %err, "task slot unreadable, starting empty");
                Vec::new()
            }
        };
        Self { slot, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// First match by label. Countdowns are keyed by id, but user-facing
    /// addressing keeps the original first-match-by-text rule.
    pub fn find_by_text(&self, text: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.text == text)
    }

    /// Validates, appends and persists a new task. `created_at` defaults to
    /// now; passing it explicitly reconstructs a task from a known instant.
    pub fn add_task(
        &mut self,
        text: &str,
        due_in_minutes: i64,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        if due_in_minutes <= 0 {
            return Err(StoreError::InvalidDueMinutes(due_in_minutes));
        }

        let task = Task::new(
            text.to_string(),
            due_in_minutes,
            created_at.unwrap_or_else(Utc::now),
        );
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Flips the task to done and persists. `is_done` is monotonic: once set
    /// it stays set until the task is deleted. Returns `None` (no-op) when the
    /// task is absent or already done.
    pub fn mark_done(&mut self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if task.is_done {
            return Ok(None);
        }
        task.is_done = true;
        let done = task.clone();
        self.persist()?;
        Ok(Some(done))
    }

    /// Removes the task and persists. `None` when absent.
    pub fn remove(&mut self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = self.tasks.remove(pos);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Serializes the full collection into the slot, overwriting prior
    /// content.
    pub fn persist(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.tasks)
            .map_err(|err| StoreError::Persist(err.into()))?;
        self.slot.write(&payload).map_err(StoreError::Persist)?;
        debug!(count = self.tasks.len(), "task collection persisted");
        Ok(())
    }

    /// Empties the collection and the durable slot.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.tasks.clear();
        self.slot.clear().map_err(StoreError::Persist)?;
        Ok(())
    }

    pub fn incomplete_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_done).count()
    }

    /// `(done, total)` pair backing the progress display.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.is_done).count();
        (done, self.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::repository::memory::MemorySlot;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_rejects_empty_text() {
        let mut store = TaskStore::load(MemorySlot::new());
        let err = store.add_task("   ", 10, None).unwrap_err();
        assert!(matches!(err, StoreError::EmptyText));
        assert!(err.is_validation());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_add_rejects_non_positive_due_minutes() {
        let mut store = TaskStore::load(MemorySlot::new());
        assert!(matches!(
            store.add_task("Write report", 0, None),
            Err(StoreError::InvalidDueMinutes(0))
        ));
        assert!(matches!(
            store.add_task("Write report", -5, None),
            Err(StoreError::InvalidDueMinutes(-5))
        ));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = TaskStore::load(slot.clone());
        store.add_task("first", 10, Some(t0())).unwrap();
        store.add_task("second", 90, Some(t0())).unwrap();
        store.add_task("third", 5, Some(t0())).unwrap();
        let second = store.tasks()[1].id;
        store.mark_done(second).unwrap();

        let reloaded = TaskStore::load(slot);
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn test_mark_done_is_idempotent_and_monotonic() {
        let mut store = TaskStore::load(MemorySlot::new());
        let task = store.add_task("Write report", 10, None).unwrap();

        assert!(store.mark_done(task.id).unwrap().is_some());
        assert!(store.tasks()[0].is_done);

        // Completing again, or completing an unknown id, is a no-op.
        assert!(store.mark_done(task.id).unwrap().is_none());
        assert!(store.mark_done(Uuid::new_v4()).unwrap().is_none());
        assert!(store.tasks()[0].is_done);
    }

    #[test]
    fn test_mutations_are_persisted_immediately() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = TaskStore::load(slot.clone());
        let task = store.add_task("Write report", 10, None).unwrap();

        store.mark_done(task.id).unwrap();
        assert!(TaskStore::load(slot.clone()).tasks()[0].is_done);

        store.remove(task.id).unwrap();
        assert!(TaskStore::load(slot).tasks().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = TaskStore::load(MemorySlot::new());
        store.add_task("Write report", 10, None).unwrap();
        assert!(store.remove(Uuid::new_v4()).unwrap().is_none());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let store = TaskStore::load(MemorySlot::seeded("not json ["));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_legacy_payload_without_ids_loads() {
        let payload = r#"[{"text":"Write report","isDone":false,"dueInMinutes":10,"createdAt":"2025-06-01T12:00:00Z"}]"#;
        let store = TaskStore::load(MemorySlot::seeded(payload));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "Write report");
    }

    #[test]
    fn test_find_by_text_returns_first_match() {
        let mut store = TaskStore::load(MemorySlot::new());
        let first = store.add_task("dup", 10, None).unwrap();
        store.add_task("dup", 20, None).unwrap();
        assert_eq!(store.find_by_text("dup").unwrap().id, first.id);
        assert!(store.find_by_text("absent").is_none());
    }

    #[test]
    fn test_clear_all_empties_collection_and_slot() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = TaskStore::load(slot.clone());
        for text in ["a", "b", "c"] {
            store.add_task(text, 10, None).unwrap();
        }

        store.clear_all().unwrap();
        assert!(store.tasks().is_empty());
        assert_eq!(slot.read().unwrap(), None);
        assert!(TaskStore::load(slot).tasks().is_empty());
    }

    #[test]
    fn test_progress_counts() {
        let mut store = TaskStore::load(MemorySlot::new());
        let a = store.add_task("a", 10, None).unwrap();
        store.add_task("b", 10, None).unwrap();
        store.mark_done(a.id).unwrap();

        assert_eq!(store.progress(), (1, 2));
        assert_eq!(store.incomplete_count(), 1);
    }
}
