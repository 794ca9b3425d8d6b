//! Choice entity

use crate::core::ids::{ChoiceId, QuestionId};
use crate::core::text::PollText;
use serde::{Deserialize, Serialize};

/// An answer option belonging to exactly one question (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub text: PollText,
    /// Number of votes cast for this choice
    pub votes: u64,
}

impl Choice {
    /// Create a choice with no votes yet
    pub fn new(id: ChoiceId, question_id: QuestionId, text: PollText) -> Self {
        Self {
            id,
            question_id,
            text,
            votes: 0,
        }
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.votes = votes;
        self
    }

    pub fn belongs_to(&self, question_id: QuestionId) -> bool {
        self.question_id == question_id
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
