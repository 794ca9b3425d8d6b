//! Poll storage adapters
//!
//! Implementations of the domain [`PollRepository`](pollster_domain::PollRepository):
//!
//! - [`InMemoryPollStore`]: process-local tables, atomic vote counters
//! - [`JsonFilePollStore`]: the in-memory store plus a JSON file rewritten
//!   after every change

mod json_file;
mod memory;
mod snapshot;

pub use json_file::JsonFilePollStore;
pub use memory::InMemoryPollStore;
pub use snapshot::PollSnapshot;
