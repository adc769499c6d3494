// Key-value storage backends
//
// The store persists through a small synchronous string-keyed interface, the
// same shape as browser local storage. Two backends ship: an in-memory map
// (tests, throwaway sessions) and a single JSON file on disk.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use tempfile::NamedTempFile;

use super::error::{PersistenceError, PersistenceResult};

/// Synchronous string-valued key-value storage
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Removing a missing key is a no-op
    fn remove_item(&mut self, key: &str) -> PersistenceResult<()>;

    /// All keys, sorted
    fn keys(&self) -> Vec<String>;
}

/// In-memory storage. Clones share the same map, so a test can keep a handle
/// while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
    read_only: Arc<Mutex<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write, to exercise degraded persistence
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.lock() = read_only;
    }

    fn check_writable(&self) -> PersistenceResult<()> {
        if *self.read_only.lock() {
            Err(PersistenceError::StorageUnavailable(
                "storage is read-only".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.check_writable()?;
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PersistenceResult<()> {
        self.check_writable()?;
        self.items.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.lock().keys().cloned().collect()
    }
}

/// Storage kept in one JSON object file. Every write rewrites the whole file
/// through a temporary file in the same directory, so a crash mid-write
/// leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage file at `path`, starting empty if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| PersistenceError::Corrupt {
                    key: path.display().to_string(),
                    message: e.to_string(),
                })?
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened storage {} ({} keys)", path.display(), items.len());
        Ok(Self { path, items })
    }

    fn flush(&self) -> PersistenceResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer(&mut tmp, &self.items)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| PersistenceError::Io(e.error.to_string()))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        let previous = self.items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // keep memory in step with disk
            match previous {
                Some(previous) => self.items.insert(key.to_string(), previous),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PersistenceResult<()> {
        if let Some(previous) = self.items.remove(key) {
            if let Err(e) = self.flush() {
                self.items.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.keys(), vec!["a", "b"]);

        storage.remove_item("a").unwrap();
        storage.remove_item("missing").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let handle = MemoryStorage::new();
        let mut owned = handle.clone();

        owned.set_item("key", "value").unwrap();
        assert_eq!(handle.get_item("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_memory_storage_read_only() {
        let mut storage = MemoryStorage::new();
        storage.set_read_only(true);

        assert!(matches!(
            storage.set_item("key", "value"),
            Err(PersistenceError::StorageUnavailable(_))
        ));
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("jobApplications", "[]").unwrap();
        storage.set_item("reminder-1", "true").unwrap();
        storage.remove_item("reminder-1").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("jobApplications").unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(reopened.keys(), vec!["jobApplications"]);
    }

    #[test]
    fn test_file_storage_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("absent.json")).unwrap();
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(PersistenceError::Corrupt { .. })
        ));
    }
}
