//! Store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Poll file used when nothing else is configured.
pub const DEFAULT_STORE_PATH: &str = "polls.json";

/// Raw store configuration from TOML
///
/// Polls are kept in `path` (relative paths resolve against the working
/// directory). `in_memory = true` keeps them for the lifetime of the
/// process only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// JSON file holding every question and choice
    pub path: Option<PathBuf>,
    /// Skip the file entirely
    pub in_memory: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_STORE_PATH)),
            in_memory: false,
        }
    }
}

impl FileStoreConfig {
    /// The file to persist to, or `None` for an in-memory store.
    pub fn file_path(&self) -> Option<&PathBuf> {
        if self.in_memory {
            return None;
        }
        self.path.as_ref().filter(|p| !p.as_os_str().is_empty())
    }
}
