//! Infrastructure layer for pollster
//!
//! This crate contains adapters that implement the ports defined in the
//! domain and application layers: poll storage, the audit log, and
//! configuration file loading.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileListingConfig, FileLoggingConfig, FileOutputConfig,
    FileStoreConfig,
};
pub use logging::JsonlAuditLogger;
pub use store::{InMemoryPollStore, JsonFilePollStore, PollSnapshot};
