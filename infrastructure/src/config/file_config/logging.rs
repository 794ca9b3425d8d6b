//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one audit event per vote or change
    pub audit_log: Option<PathBuf>,
    /// Directory for a diagnostics log file, in addition to stderr
    pub directory: Option<PathBuf>,
}
