//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for rendered polls
///
/// This is a domain concept representing how views should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable console output (default)
    #[default]
    Text,
    /// JSON output
    Json,
}
