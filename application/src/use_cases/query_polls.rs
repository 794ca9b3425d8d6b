//! Query Polls use case.
//!
//! Read side of the polling application: the index listing, the detail
//! view and the results view. Every lookup applies the publication policy,
//! so a question scheduled for the future is reported exactly like one that
//! does not exist.

use crate::config::ListingParams;
use chrono::{DateTime, Utc};
use pollster_domain::{Choice, PollRepository, PollResults, Question, QuestionId, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading polls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The question does not exist or is not published yet.
    #[error("Question not found: {0}")]
    NotFound(QuestionId),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for QueryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::QuestionNotFound(id) => QueryError::NotFound(id),
            other => QueryError::Store(other),
        }
    }
}

/// A question together with its choices, as shown on the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    /// Choices in ascending id order
    pub choices: Vec<Choice>,
}

impl QuestionDetail {
    pub fn new(question: Question, mut choices: Vec<Choice>) -> Self {
        choices.sort_by_key(|c| c.id);
        Self { question, choices }
    }
}

/// Use case for the read-only poll views.
#[derive(Clone)]
pub struct QueryPollsUseCase {
    repository: Arc<dyn PollRepository>,
    params: ListingParams,
}

impl QueryPollsUseCase {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self {
            repository,
            params: ListingParams::default(),
        }
    }

    pub fn with_params(mut self, params: ListingParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ListingParams {
        &self.params
    }

    /// The most recently published questions, capped at the configured limit.
    pub async fn latest_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>, QueryError> {
        self.latest_questions_with_limit(now, self.params.latest_limit)
            .await
    }

    /// The `limit` most recently published questions, newest first.
    ///
    /// The publication cutoff is applied by the store before the limit, so
    /// questions scheduled for the future never take a slot.
    pub async fn latest_questions_with_limit(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, QueryError> {
        let questions = self
            .repository
            .list_questions_published_until(now, limit)
            .await?;
        debug_assert!(questions.iter().all(|q| q.is_published(now)));
        debug!("Index view: {} of at most {} questions", questions.len(), limit);
        Ok(questions)
    }

    /// Look a question up, hiding it unless it is published at `now`.
    pub async fn get_visible_question(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<Question, QueryError> {
        let question = self.repository.get_question(id).await?;
        if !question.is_published(now) {
            debug!("Question {} is scheduled for {}", id, question.published_at);
            return Err(QueryError::NotFound(id));
        }
        Ok(question)
    }

    /// The detail view: a visible question and its choices.
    pub async fn question_detail(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<QuestionDetail, QueryError> {
        let question = self.get_visible_question(id, now).await?;
        let choices = self.repository.list_choices(id).await?;
        Ok(QuestionDetail::new(question, choices))
    }

    /// The results view: a visible question and its vote tallies.
    pub async fn results(
        &self,
        id: QuestionId,
        now: DateTime<Utc>,
    ) -> Result<PollResults, QueryError> {
        let question = self.get_visible_question(id, now).await?;
        let choices = self.repository.list_choices(id).await?;
        Ok(PollResults::new(question, choices))
    }
}
