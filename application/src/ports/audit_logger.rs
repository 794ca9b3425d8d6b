//! Port for structured audit logging.
//!
//! Defines the [`AuditLogger`] trait for recording what happened to polls
//! (questions created or edited, votes cast or rejected) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable trail of every state change and vote attempt (JSONL).

use pollster_domain::{ChoiceId, Question, QuestionId};
use serde_json::{Value, json};

/// A structured audit event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp when writing.
#[derive(Debug, Clone, PartialEq)]
pub struct PollEvent {
    /// Event type identifier (e.g., "vote_cast", "question_created").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl PollEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn question_created(question: &Question, choices: usize) -> Self {
        Self::new(
            "question_created",
            json!({
                "question_id": question.id,
                "text": question.text,
                "published_at": question.published_at,
                "choices": choices,
            }),
        )
    }

    pub fn question_updated(question: &Question) -> Self {
        Self::new(
            "question_updated",
            json!({
                "question_id": question.id,
                "text": question.text,
                "published_at": question.published_at,
            }),
        )
    }

    pub fn question_deleted(question_id: QuestionId) -> Self {
        Self::new("question_deleted", json!({ "question_id": question_id }))
    }

    pub fn choice_added(question_id: QuestionId, choice_id: ChoiceId) -> Self {
        Self::new(
            "choice_added",
            json!({ "question_id": question_id, "choice_id": choice_id }),
        )
    }

    pub fn choice_deleted(choice_id: ChoiceId) -> Self {
        Self::new("choice_deleted", json!({ "choice_id": choice_id }))
    }

    pub fn vote_cast(question_id: QuestionId, choice_id: ChoiceId, votes: u64) -> Self {
        Self::new(
            "vote_cast",
            json!({
                "question_id": question_id,
                "choice_id": choice_id,
                "votes": votes,
            }),
        )
    }

    pub fn vote_rejected(question_id: QuestionId, reason: &str) -> Self {
        Self::new(
            "vote_rejected",
            json!({ "question_id": question_id, "reason": reason }),
        )
    }
}

/// Port for logging audit events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible so that a logging
/// failure never turns a successful vote into an error.
pub trait AuditLogger: Send + Sync {
    /// Record an audit event.
    fn log(&self, event: PollEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: PollEvent) {}
}
