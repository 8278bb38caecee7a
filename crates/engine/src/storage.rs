//! Persistence backends for the [`Records`] document.
//!
//! The engine never writes partially: every mutation hands the complete new
//! document to [`Storage::save`] and only adopts it once the save succeeded.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{EngineError, Records, ResultEngine};

/// Abstraction over where the document lives.
pub trait Storage: Send + Sync {
    /// Read the stored document, `None` when nothing was saved yet.
    fn load(&self) -> ResultEngine<Option<Records>>;

    /// Replace the stored document.
    fn save(&self, records: &Records) -> ResultEngine<()>;
}

/// Keeps the document in process memory. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Option<Records>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document instead of an empty store.
    pub fn with_records(records: Records) -> Self {
        Self {
            records: Mutex::new(Some(records)),
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> ResultEngine<Option<Records>> {
        let guard = self
            .records
            .lock()
            .map_err(|_| EngineError::Persistence("memory storage poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, records: &Records) -> ResultEngine<()> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| EngineError::Persistence("memory storage poisoned".to_string()))?;
        *guard = Some(records.clone());
        Ok(())
    }
}

/// Stores the document as pretty-printed JSON in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> ResultEngine<Option<Records>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, records: &Records) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;

        // Write next to the target and swap it in, so a crash mid-write
        // leaves the previous document intact.
        let tmp = self.tmp_path();
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_starts_empty_and_keeps_last_save() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        let records = Records::default();
        storage.save(&records).unwrap();
        assert_eq!(storage.load().unwrap(), Some(records));
    }

    #[test]
    fn json_file_round_trips_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/budget.json"));
        assert_eq!(storage.load().unwrap(), None);

        let mut records = Records::default();
        records.next_id = 42;
        storage.save(&records).unwrap();

        assert_eq!(storage.load().unwrap(), Some(records));
        assert!(!storage.tmp_path().exists());
    }

    #[test]
    fn corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStorage::new(path).load().unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));
    }
}
