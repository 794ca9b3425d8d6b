//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod listing;
mod logging;
mod output;
mod store;

pub use listing::FileListingConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use store::FileStoreConfig;

use pollster_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where polls are stored
    pub store: FileStoreConfig,
    /// Index view settings
    pub listing: FileListingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Audit and diagnostics logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.listing.latest_limit == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "listing.latest_limit".to_string(),
                },
                "listing.latest_limit must be at least 1",
            ));
        }

        if !self.store.in_memory
            && self
                .store
                .path
                .as_ref()
                .is_some_and(|p| p.as_os_str().is_empty())
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyPath {
                    field: "store.path".to_string(),
                },
                "store.path is empty, polls will only be kept in memory",
            ));
        }

        for (field, path) in [
            ("logging.audit_log", &self.logging.audit_log),
            ("logging.directory", &self.logging.directory),
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyPath {
                        field: field.to_string(),
                    },
                    format!("{field} is empty and will be ignored"),
                ));
            }
        }

        issues
    }
}
