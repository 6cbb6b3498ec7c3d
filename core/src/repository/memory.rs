use std::sync::Mutex;

use anyhow::Result;

use crate::repository::traits::StorageSlot;

/// In-memory slot. Used by tests and anywhere durability is not wanted.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(payload: &str) -> Self {
        Self {
            payload: Mutex::new(Some(payload.to_string())),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.lock().expect("slot lock poisoned").clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        *self.payload.lock().expect("slot lock poisoned") = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.payload.lock().expect("slot lock poisoned") = None;
        Ok(())
    }
}
