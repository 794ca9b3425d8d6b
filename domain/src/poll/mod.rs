//! Poll domain
//!
//! Questions, their choices and the rules deciding when a question is
//! visible.
//!
//! - [`question::Question`]: a poll question with its publication time
//! - [`choice::Choice`]: an answer option with a vote counter
//! - [`publication`]: pure visibility rules (`is_published`, `is_recently_published`)
//! - [`results::PollResults`]: vote tallies for a results view
//! - [`repository::PollRepository`]: trait for question/choice storage
//!
//! # Visibility
//!
//! ```text
//!            not recent                 recent         future (hidden)
//!  ──────────────────────────────┬───────────────┬──────────────────────▶ time
//!                           now - 1 day         now
//! ```
//!
//! A question is published once `published_at <= now`; before that it
//! behaves as if it did not exist at all.

pub mod choice;
pub mod publication;
pub mod question;
pub mod repository;
pub mod results;

pub use choice::Choice;
pub use publication::{PublishedFilter, is_published, is_recently_published};
pub use question::Question;
pub use repository::{PollRepository, StoreError};
pub use results::PollResults;
