//! Publication policy
//!
//! Pure functions over a question's publication timestamp and the current
//! time. The caller always supplies `now`; nothing here reads a clock.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Whether a question published at `published_at` is visible at `now`.
///
/// The boundary is inclusive: a question becomes visible at the exact
/// instant of its publication.
pub fn is_published(published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    published_at <= now
}

/// Whether `published_at` lies in the closed 24-hour window ending at `now`.
///
/// A timestamp in the future is never "recently published".
pub fn is_recently_published(published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - Duration::days(1) <= published_at && published_at <= now
}

/// Publication-date filter for administrative listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishedFilter {
    /// No restriction
    #[default]
    Any,
    /// Same calendar day (UTC) as `now`
    Today,
    /// Within the seven days ending at `now`
    PastSevenDays,
    /// Same calendar month (UTC) as `now`
    ThisMonth,
    /// Same calendar year (UTC) as `now`
    ThisYear,
}

impl PublishedFilter {
    pub fn matches(self, published_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            PublishedFilter::Any => true,
            PublishedFilter::Today => published_at.date_naive() == now.date_naive(),
            PublishedFilter::PastSevenDays => {
                now - Duration::days(7) <= published_at && published_at <= now
            }
            PublishedFilter::ThisMonth => {
                published_at.year() == now.year() && published_at.month() == now.month()
            }
            PublishedFilter::ThisYear => published_at.year() == now.year(),
        }
    }

    /// Human-readable label, as shown next to the filter in a listing.
    pub fn label(self) -> &'static str {
        match self {
            PublishedFilter::Any => "Any date",
            PublishedFilter::Today => "Today",
            PublishedFilter::PastSevenDays => "Past 7 days",
            PublishedFilter::ThisMonth => "This month",
            PublishedFilter::ThisYear => "This year",
        }
    }
}
