//! Question entity

use super::publication::{is_published, is_recently_published};
use crate::core::ids::QuestionId;
use crate::core::text::PollText;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A poll question (Entity)
///
/// Owns its choices: removing a question from the store removes every
/// [`Choice`](super::choice::Choice) that refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: PollText,
    pub published_at: DateTime<Utc>,
}

impl Question {
    pub fn new(id: QuestionId, text: PollText, published_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            published_at,
        }
    }

    /// Whether the question is visible at `now`.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        is_published(self.published_at, now)
    }

    /// Whether the question was published within the day ending at `now`.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        is_recently_published(self.published_at, now)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
