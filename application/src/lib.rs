//! Application layer for pollster
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ListingParams;
pub use ports::audit_logger::{AuditLogger, NoAuditLogger, PollEvent};
pub use use_cases::cast_vote::{CastVoteUseCase, VoteError, VoteOutcome, VoteRequest};
pub use use_cases::manage_polls::{
    AdminError, AdminQuery, AdminQuestionRow, ManagePollsUseCase, NewQuestion, QuestionChanges,
};
pub use use_cases::query_polls::{QueryError, QueryPollsUseCase, QuestionDetail};
