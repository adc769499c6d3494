//! The jobtrack engine: a [`JobStore`] owning the job collection, backed by a
//! key-value [`persistence`] layer, emitting transient notifications through
//! the [`notifications`] center and moving export/import files through an
//! injected [`integrations::FileTransfer`].

pub mod config;
pub mod integrations;
pub mod notifications;
pub mod persistence;
pub mod store;

pub use config::StoreConfig;
pub use store::{ExportError, ImportError, JobStore};
