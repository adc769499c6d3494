// Persistence Layer
//
// This module persists the job collection and reminder flags to a
// synchronous key-value storage, degrading to in-memory operation when the
// backend stops accepting writes.

mod error;
mod manager;
mod storage;

pub use error::{PersistenceError, PersistenceResult};
pub use manager::PersistenceManager;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
