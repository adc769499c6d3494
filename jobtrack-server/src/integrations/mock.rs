// File Transfer - Mock
//
// In-memory implementation of FileTransfer for unit testing.
// Tests can seed files, simulate failures and inspect what was written.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::adapter::{FileHandle, FileTransfer};
use super::error::{IntegrationError, IntegrationResult};

/// Mock file transfer for testing the store without touching disk.
///
/// Clones share state, so a test can keep one handle while the store owns
/// another.
///
/// # Example
///
/// ```ignore
/// let files = MockFiles::new();
/// files.set_file("upload.json", r#"[{"company":"Acme"}]"#);
///
/// store.import_jobs(&FileHandle::new("upload.json")).await?;
/// assert_eq!(files.read_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockFiles {
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,

    /// Error returned by every `read()` while set
    read_error: Arc<Mutex<Option<IntegrationError>>>,

    /// Error returned by every `write()` while set
    write_error: Arc<Mutex<Option<IntegrationError>>>,

    read_count: Arc<AtomicUsize>,
    write_count: Arc<AtomicUsize>,
}

impl MockFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file that `read()` will return for a handle of the same name
    pub fn set_file(&self, name: &str, contents: impl Into<Vec<u8>>) {
        self.files.lock().insert(name.to_string(), contents.into());
    }

    pub fn fail_reads(&self, error: Option<IntegrationError>) {
        *self.read_error.lock() = error;
    }

    pub fn fail_writes(&self, error: Option<IntegrationError>) {
        *self.write_error.lock() = error;
    }

    /// Contents of a written or seeded file as UTF-8
    pub fn written(&self, name: &str) -> Option<String> {
        self.files
            .lock()
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::Relaxed)
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FileTransfer for MockFiles {
    async fn write(&self, filename: &str, contents: &[u8]) -> IntegrationResult<FileHandle> {
        self.write_count.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = self.write_error.lock().clone() {
            return Err(error);
        }

        self.files.lock().insert(filename.to_string(), contents.to_vec());
        Ok(FileHandle::new(filename))
    }

    async fn read(&self, handle: &FileHandle) -> IntegrationResult<Vec<u8>> {
        self.read_count.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = self.read_error.lock().clone() {
            return Err(error);
        }

        let key = handle.path().to_string_lossy();
        self.files
            .lock()
            .get(key.as_ref())
            .cloned()
            .ok_or_else(|| IntegrationError::FileNotFound(handle.to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
