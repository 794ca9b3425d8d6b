//! Vote tallies for a question
//!
//! [`PollResults`] is the read model behind a results view: the question,
//! its choices with their counts, and aggregate statistics.

use super::choice::Choice;
use super::question::Question;
use serde::{Deserialize, Serialize};

/// Aggregated results of a poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    pub question: Question,
    /// Choices in ascending id order
    pub choices: Vec<Choice>,
    /// Sum of the votes of every choice
    pub total_votes: u64,
}

impl PollResults {
    pub fn new(question: Question, mut choices: Vec<Choice>) -> Self {
        choices.sort_by_key(|c| c.id);
        let total_votes = choices.iter().map(|c| c.votes).sum();
        Self {
            question,
            choices,
            total_votes,
        }
    }

    /// Share of all votes that went to `choice` (0.0 to 1.0)
    pub fn share(&self, choice: &Choice) -> f64 {
        if self.total_votes == 0 {
            0.0
        } else {
            choice.votes as f64 / self.total_votes as f64
        }
    }

    /// Choices holding the highest count; empty while nobody has voted.
    pub fn leaders(&self) -> impl Iterator<Item = &Choice> {
        let top = self.choices.iter().map(|c| c.votes).max().unwrap_or(0);
        self.choices
            .iter()
            .filter(move |c| top > 0 && c.votes == top)
    }

    pub fn has_votes(&self) -> bool {
        self.total_votes > 0
    }
}
