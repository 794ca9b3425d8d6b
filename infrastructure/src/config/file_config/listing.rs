//! Listing configuration from TOML (`[listing]` section)

use pollster_application::ListingParams;
use pollster_application::config::listing_params::DEFAULT_LATEST_LIMIT;
use serde::{Deserialize, Serialize};

/// Raw listing configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileListingConfig {
    /// Number of questions on the index view
    pub latest_limit: usize,
}

impl Default for FileListingConfig {
    fn default() -> Self {
        Self {
            latest_limit: DEFAULT_LATEST_LIMIT,
        }
    }
}

impl FileListingConfig {
    /// Convert to the application-level parameters.
    pub fn to_listing_params(&self) -> ListingParams {
        ListingParams::default().with_latest_limit(self.latest_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_listing_params() {
        let config = FileListingConfig { latest_limit: 9 };
        assert_eq!(config.to_listing_params().latest_limit, 9);
    }
}
