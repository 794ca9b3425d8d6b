//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! Storage itself is a domain trait
//! ([`PollRepository`](pollster_domain::PollRepository)).

pub mod audit_logger;
