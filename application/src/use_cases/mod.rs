//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod cast_vote;
pub mod manage_polls;
pub mod query_polls;

#[cfg(test)]
pub(crate) mod test_support;
