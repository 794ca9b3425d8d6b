//! Manage Polls use case.
//!
//! Plain create/edit/delete operations over questions and choices for an
//! administrative surface, plus the admin listing with free-text search and
//! a publication-date filter. Unlike the public views, nothing here hides
//! questions scheduled for the future.

use super::query_polls::QuestionDetail;
use crate::ports::audit_logger::{AuditLogger, NoAuditLogger, PollEvent};
use chrono::{DateTime, Utc};
use pollster_domain::util::preview;
use pollster_domain::{
    ChoiceId, DomainError, PollRepository, PollText, PublishedFilter, Question, QuestionId,
    StoreError,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during administrative operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AdminError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::Store(e) if e.is_not_found())
    }
}

/// A question to create, with its inline choices.
///
/// Blank choice rows are skipped, so a form with spare empty rows can be
/// submitted as-is.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub choices: Vec<String>,
}

impl NewQuestion {
    pub fn new(text: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            published_at,
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, text: impl Into<String>) -> Self {
        self.choices.push(text.into());
        self
    }
}

/// Edits to an existing question; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub text: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.published_at.is_none()
    }
}

/// Search and filter criteria for the admin listing.
#[derive(Debug, Clone, Default)]
pub struct AdminQuery {
    /// Case-insensitive substring of the question text
    pub search: Option<String>,
    pub published: PublishedFilter,
}

/// One line of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminQuestionRow {
    pub question: Question,
    pub choice_count: usize,
    pub total_votes: u64,
    pub published_recently: bool,
}

/// Use case for poll administration.
pub struct ManagePollsUseCase {
    repository: Arc<dyn PollRepository>,
    audit_logger: Arc<dyn AuditLogger>,
}

impl ManagePollsUseCase {
    pub fn new(repository: Arc<dyn PollRepository>) -> Self {
        Self {
            repository,
            audit_logger: Arc::new(NoAuditLogger),
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    /// Create a question and its inline choices.
    ///
    /// All text is validated before anything is written.
    pub async fn create_question(&self, input: NewQuestion) -> Result<QuestionDetail, AdminError> {
        let text = PollText::parse(input.text)?;
        let choice_texts = input
            .choices
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .map(PollText::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let id = self
            .repository
            .create_question(text, input.published_at)
            .await?;
        for choice_text in choice_texts {
            self.repository.create_choice(id, choice_text).await?;
        }

        let detail = self.question(id).await?;
        info!(
            "Created question {} \"{}\" with {} choices",
            id,
            preview(detail.question.text.as_str(), 60),
            detail.choices.len()
        );
        self.audit_logger.log(PollEvent::question_created(
            &detail.question,
            detail.choices.len(),
        ));
        Ok(detail)
    }

    /// A question and its choices, whatever its publication time.
    pub async fn question(&self, id: QuestionId) -> Result<QuestionDetail, AdminError> {
        let question = self.repository.get_question(id).await?;
        let choices = self.repository.list_choices(id).await?;
        Ok(QuestionDetail::new(question, choices))
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        changes: QuestionChanges,
    ) -> Result<Question, AdminError> {
        let text = changes.text.map(PollText::parse).transpose()?;
        let question = self
            .repository
            .update_question(id, text, changes.published_at)
            .await?;
        info!("Updated question {}", id);
        self.audit_logger.log(PollEvent::question_updated(&question));
        Ok(question)
    }

    /// Delete a question and, with it, all of its choices.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), AdminError> {
        self.repository.delete_question(id).await?;
        info!("Deleted question {}", id);
        self.audit_logger.log(PollEvent::question_deleted(id));
        Ok(())
    }

    pub async fn add_choice(
        &self,
        question_id: QuestionId,
        text: impl Into<String>,
    ) -> Result<ChoiceId, AdminError> {
        let text = PollText::parse(text)?;
        let choice_id = self.repository.create_choice(question_id, text).await?;
        info!("Added choice {} to question {}", choice_id, question_id);
        self.audit_logger
            .log(PollEvent::choice_added(question_id, choice_id));
        Ok(choice_id)
    }

    pub async fn delete_choice(&self, id: ChoiceId) -> Result<(), AdminError> {
        self.repository.delete_choice(id).await?;
        info!("Deleted choice {}", id);
        self.audit_logger.log(PollEvent::choice_deleted(id));
        Ok(())
    }

    /// The admin listing, most recently published first.
    pub async fn list_questions(
        &self,
        query: &AdminQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdminQuestionRow>, AdminError> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut rows = Vec::new();
        for question in self.repository.all_questions().await? {
            if let Some(needle) = &needle
                && !question.text.as_str().to_lowercase().contains(needle)
            {
                continue;
            }
            if !query.published.matches(question.published_at, now) {
                continue;
            }

            let choices = self.repository.list_choices(question.id).await?;
            rows.push(AdminQuestionRow {
                choice_count: choices.len(),
                total_votes: choices.iter().map(|c| c.votes).sum(),
                published_recently: question.was_published_recently(now),
                question,
            });
        }

        debug!(
            "Admin listing: {} questions (search={:?}, filter={})",
            rows.len(),
            needle,
            query.published.label()
        );
        Ok(rows)
    }
}
