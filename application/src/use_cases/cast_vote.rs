//! Cast Vote use case.
//!
//! Records one vote for a choice of a published question:
//!
//! 1. Resolve the question through the publication policy
//! 2. Require a choice in the request
//! 3. Require the choice to belong to that question
//! 4. Increment the counter with a single atomic store call
//!
//! Nothing is written unless every check passes. Redirecting to a results
//! view after a successful vote is left to the caller.

use super::query_polls::{QueryError, QueryPollsUseCase};
use crate::ports::audit_logger::{AuditLogger, NoAuditLogger, PollEvent};
use chrono::{DateTime, Utc};
use pollster_domain::{ChoiceId, PollRepository, QuestionId, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while casting a vote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    /// The question does not exist or is not published yet (404-equivalent).
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// The request carried no choice.
    #[error("No choice selected")]
    NoChoiceSelected,

    /// The submitted choice is not one of the question's choices.
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl VoteError {
    /// User errors that should re-display the voting form.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VoteError::NoChoiceSelected | VoteError::InvalidChoice(_))
    }

    /// Message to show next to the voting form, for recoverable errors.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            VoteError::NoChoiceSelected => Some("You didn't select a choice."),
            VoteError::InvalidChoice(_) => Some("The selected choice is not part of this poll."),
            _ => None,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            VoteError::QuestionNotFound(_) => "question_not_found",
            VoteError::NoChoiceSelected => "no_choice_selected",
            VoteError::InvalidChoice(_) => "invalid_choice",
            VoteError::Store(_) => "store_error",
        }
    }
}

impl From<QueryError> for VoteError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::NotFound(id) => VoteError::QuestionNotFound(id),
            QueryError::Store(e) => VoteError::Store(e),
        }
    }
}

/// Input for the [`CastVoteUseCase`].
///
/// `choice` is the raw form field; it is parsed only after the question
/// has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    pub question_id: QuestionId,
    pub choice: Option<String>,
}

impl VoteRequest {
    pub fn new(question_id: QuestionId) -> Self {
        Self {
            question_id,
            choice: None,
        }
    }

    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }
}

/// A successfully recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    /// Vote count of the choice right after this vote
    pub votes: u64,
}

/// Use case for casting a vote.
pub struct CastVoteUseCase {
    repository: Arc<dyn PollRepository>,
    queries: QueryPollsUseCase,
    audit_logger: Arc<dyn AuditLogger>,
}

impl Clone for CastVoteUseCase {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            queries: self.queries.clone(),
            audit_logger: self.audit_logger.clone(),
        }
    }
}

impl CastVoteUseCase {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self {
            queries: QueryPollsUseCase::new(repository.clone()),
            repository,
            audit_logger: Arc::new(NoAuditLogger),
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    /// Cast a vote as of `now`.
    pub async fn execute(
        &self,
        request: VoteRequest,
        now: DateTime<Utc>,
    ) -> Result<VoteOutcome, VoteError> {
        let question_id = request.question_id;
        let result = self.cast(request, now).await;

        match &result {
            Ok(outcome) => {
                info!(
                    "Vote for choice {} of question {} (now {})",
                    outcome.choice_id, outcome.question_id, outcome.votes
                );
                self.audit_logger.log(PollEvent::vote_cast(
                    outcome.question_id,
                    outcome.choice_id,
                    outcome.votes,
                ));
            }
            Err(e) => {
                warn!("Vote on question {} rejected: {}", question_id, e);
                self.audit_logger
                    .log(PollEvent::vote_rejected(question_id, e.reason()));
            }
        }

        result
    }

    async fn cast(&self, request: VoteRequest, now: DateTime<Utc>) -> Result<VoteOutcome, VoteError> {
        let question = self
            .queries
            .get_visible_question(request.question_id, now)
            .await?;

        let raw = match request.choice.as_deref().map(str::trim) {
            None | Some("") => return Err(VoteError::NoChoiceSelected),
            Some(raw) => raw,
        };
        let choice_id: ChoiceId = raw
            .parse()
            .map_err(|_| VoteError::InvalidChoice(raw.to_string()))?;

        let choices = self
            .repository
            .list_choices(question.id)
            .await
            .map_err(VoteError::Store)?;
        if !choices.iter().any(|c| c.id == choice_id) {
            return Err(VoteError::InvalidChoice(raw.to_string()));
        }

        let votes = match self.repository.increment_choice_votes(choice_id).await {
            Ok(votes) => votes,
            // Deleted between validation and increment.
            Err(StoreError::ChoiceNotFound(_)) => {
                return Err(VoteError::InvalidChoice(raw.to_string()));
            }
            Err(e) => return Err(VoteError::Store(e)),
        };

        Ok(VoteOutcome {
            question_id: question.id,
            choice_id,
            votes,
        })
    }
}
