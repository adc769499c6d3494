// File Transfer - Adapter Trait
//
// The store never touches the file system for export or import directly.
// It hands bytes to a `FileTransfer` (the "download" side of export) and
// asks one for bytes back (the "upload" side of import).

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::IntegrationResult;

/// Opaque reference to a file produced by, or offered to, a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle(PathBuf);

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Moves whole files between the store and the outside world.
///
/// Implementations should fail with an `IntegrationError` rather than panic;
/// the store reports failures as notifications and carries on.
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Deliver `contents` under `filename` and return where it went.
    async fn write(&self, filename: &str, contents: &[u8]) -> IntegrationResult<FileHandle>;

    /// Read the whole file behind `handle`.
    async fn read(&self, handle: &FileHandle) -> IntegrationResult<Vec<u8>>;

    /// Human-readable name for logs
    fn name(&self) -> &str;
}
