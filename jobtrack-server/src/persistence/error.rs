// Persistence error types

use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Storage backend could not be read or written
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// Serialization error (JSON encoding)
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Stored value exists but cannot be decoded
    #[error("Stored value under '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    /// Storage unavailable (continuing in memory)
    #[error("Storage unavailable (continuing without persistence): {0}")]
    StorageUnavailable(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
