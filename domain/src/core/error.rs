//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}
