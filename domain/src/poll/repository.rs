//! Poll repository trait

use super::choice::Choice;
use super::question::Question;
use crate::core::ids::{ChoiceId, QuestionId};
use crate::core::text::PollText;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors reported by a [`PollRepository`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Choice not found: {0}")]
    ChoiceNotFound(ChoiceId),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Check if this error means the looked-up record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::QuestionNotFound(_) | StoreError::ChoiceNotFound(_)
        )
    }
}

/// Storage for questions and their choices
///
/// This is a domain-level abstraction; implementations live in the
/// infrastructure layer. Listing methods order questions by
/// `published_at` descending and break ties by id descending.
#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Store a new question and return its identity
    async fn create_question(
        &self,
        text: PollText,
        published_at: DateTime<Utc>,
    ) -> Result<QuestionId, StoreError>;

    /// Attach a new choice (with zero votes) to an existing question
    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: PollText,
    ) -> Result<ChoiceId, StoreError>;

    async fn get_question(&self, id: QuestionId) -> Result<Question, StoreError>;

    async fn get_choice(&self, id: ChoiceId) -> Result<Choice, StoreError>;

    /// Choices of a question; empty if the question has none or does not exist
    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError>;

    /// At most `limit` questions, most recently published first
    async fn list_questions_ordered_by_published_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError>;

    /// Like [`list_questions_ordered_by_published_desc`](Self::list_questions_ordered_by_published_desc),
    /// restricted to questions with `published_at <= cutoff` before the limit applies
    async fn list_questions_published_until(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError>;

    /// Every question, most recently published first
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// Add one vote to a choice and return the new count
    ///
    /// Must be a single atomic read-modify-write: concurrent increments of
    /// the same choice never lose an update.
    async fn increment_choice_votes(&self, choice_id: ChoiceId) -> Result<u64, StoreError>;

    /// Replace the text and/or publication time of a question
    async fn update_question(
        &self,
        id: QuestionId,
        text: Option<PollText>,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Question, StoreError>;

    /// Remove a question together with all of its choices
    async fn delete_question(&self, id: QuestionId) -> Result<(), StoreError>;

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), StoreError>;
}
