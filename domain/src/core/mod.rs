//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::QuestionId`] / [`ids::ChoiceId`]: store-assigned identities
//! - [`text::PollText`]: validated question/choice text
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
pub mod text;
