// File Transfer Layer
//
// Export and import move whole JSON files across the store boundary. The
// store depends only on the `FileTransfer` trait:
//
// ```text
//   JobStore::export_jobs ──write──▶ ┌──────────────┐
//                                   │ FileTransfer │ ─▶ LocalFiles / MockFiles
//   JobStore::import_jobs ◀──read─── └──────────────┘
// ```
//
// For testing:
// ```ignore
// let files = MockFiles::new();
// let mut store = JobStore::new(storage, Arc::new(files.clone()), clock, config);
// store.export_jobs(None).await?;
// assert!(files.written("job-applications.json").is_some());
// ```

mod adapter;
mod error;
mod local;
mod mock;

pub use adapter::{FileHandle, FileTransfer};
pub use error::{IntegrationError, IntegrationResult};
pub use local::LocalFiles;
pub use mock::MockFiles;
