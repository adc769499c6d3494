// File Transfer - Error Types
//
// Errors raised while handing export files out or reading import files in.
// A failed transfer is reported to the store, which turns it into a
// notification; it never takes the store down.

use std::io;

use thiserror::Error;

/// Errors that can occur while moving files in or out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    /// The file to import does not exist
    #[error("File not found: '{0}'")]
    FileNotFound(String),

    /// Export file name is empty or would escape the export directory
    #[error("Invalid file name: '{0}'")]
    InvalidFilename(String),

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for IntegrationError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

/// Result type for file transfer operations
pub type IntegrationResult<T> = Result<T, IntegrationError>;
