use thiserror::Error;

/// Errors surfaced by the task store. Validation failures abort the operation
/// with no state change; corrupt persisted data is never surfaced (the store
/// recovers by loading an empty collection).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task text must not be empty")]
    EmptyText,

    #[error("due minutes must be a positive number, got {0}")]
    InvalidDueMinutes(i64),

    #[error("failed to persist tasks: {0}")]
    Persist(anyhow::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyText | StoreError::InvalidDueMinutes(_))
    }
}
