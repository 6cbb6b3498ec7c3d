use std::sync::Arc;

use anyhow::Result;

/// A single durable key-value slot holding the serialized task collection:
/// read the whole payload, overwrite it wholesale, or remove it. There is no
/// append and no partial update.
pub trait StorageSlot {
    /// Returns the stored payload, or `None` when the slot has never been
    /// written (or was cleared).
    fn read(&self) -> Result<Option<String>>;

    fn write(&self, payload: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

impl<S: StorageSlot + ?Sized> StorageSlot for Arc<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<()> {
        (**self).write(payload)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
