//! Listing parameters: index view control.
//!
//! [`ListingParams`] holds the static parameters used by
//! [`QueryPollsUseCase`](crate::use_cases::query_polls::QueryPollsUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Default number of questions on the index view.
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// Index view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    /// Maximum number of questions returned by `latest_questions`.
    pub latest_limit: usize,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            latest_limit: DEFAULT_LATEST_LIMIT,
        }
    }
}

impl ListingParams {
    pub fn with_latest_limit(mut self, limit: usize) -> Self {
        self.latest_limit = limit;
        self
    }
}
