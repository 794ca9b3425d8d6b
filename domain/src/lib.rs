//! Domain layer for pollster
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Questions and Choices
//!
//! A [`Question`] is published at a point in time and owns a set of
//! [`Choice`]s, each carrying a vote counter that only ever grows.
//!
//! ## Publication
//!
//! - **Published**: `published_at <= now`; anything later is hidden
//! - **Recently published**: within the closed day ending at `now`
//!
//! The current time is always an explicit argument.

pub mod config;
pub mod core;
pub mod poll;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    ids::{ChoiceId, QuestionId},
    text::{MAX_TEXT_CHARS, PollText},
};
pub use poll::{
    Choice, PollRepository, PollResults, PublishedFilter, Question, StoreError, is_published,
    is_recently_published,
};
