use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::repository::traits::StorageSlot;

const SLOT_FILE_NAME: &str = "todoTasks.json";

/// File-backed storage slot: one JSON file under the data directory
/// (default `~/.duetick`).
#[derive(Debug, Clone)]
pub struct FileSlot {
    file_path: PathBuf,
}

impl FileSlot {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("could not determine home directory"))?;
                home_dir.join(".duetick")
            }
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("create data directory {}", path.display()))?;
        path.push(SLOT_FILE_NAME);

        Ok(FileSlot { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.file_path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context("read task slot"),
        }
    }

    fn write(&self, payload: &str) -> Result<()> {
        let file = File::create(&self.file_path).context("open task slot for writing")?;
        let mut writer = BufWriter::new(file);
        writer.write_all(payload.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("clear task slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_slot_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn test_write_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(Some(dir.path().to_path_buf())).unwrap();

        slot.write("[1]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1]"));

        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(Some(dir.path().to_path_buf())).unwrap();

        slot.write("[]").unwrap();
        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);
        slot.clear().unwrap();
    }
}
