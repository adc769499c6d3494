// File Transfer - Local Directory
//
// Writes exports into a directory on disk and reads imports from any path.

use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};

use super::adapter::{FileHandle, FileTransfer};
use super::error::{IntegrationError, IntegrationResult};

/// File transfer backed by the local file system
#[derive(Debug, Clone)]
pub struct LocalFiles {
    export_dir: PathBuf,
}

impl LocalFiles {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }
}

fn check_filename(filename: &str) -> IntegrationResult<()> {
    let plain = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(IntegrationError::InvalidFilename(filename.to_string()))
    }
}

#[async_trait]
impl FileTransfer for LocalFiles {
    async fn write(&self, filename: &str, contents: &[u8]) -> IntegrationResult<FileHandle> {
        check_filename(filename)?;
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let path = self.export_dir.join(filename);
        tokio::fs::write(&path, contents).await?;
        info!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(FileHandle::new(path))
    }

    async fn read(&self, handle: &FileHandle) -> IntegrationResult<Vec<u8>> {
        match tokio::fs::read(handle.path()).await {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), handle);
                Ok(bytes)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(IntegrationError::FileNotFound(handle.to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let files = LocalFiles::new(dir.path().join("exports"));

        let handle = files.write("jobs.json", b"[]").await.unwrap();

        assert_eq!(handle.path(), dir.path().join("exports").join("jobs.json"));
        assert_eq!(files.read(&handle).await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_write_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let files = LocalFiles::new(dir.path());

        for name in ["", "..", "../escape.json", "a/b.json"] {
            let result = files.write(name, b"[]").await;
            assert!(
                matches!(result, Err(IntegrationError::InvalidFilename(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = LocalFiles::new(dir.path());

        let result = files.read(&FileHandle::new(dir.path().join("nope.json"))).await;
        assert!(matches!(result, Err(IntegrationError::FileNotFound(_))));
    }
}
