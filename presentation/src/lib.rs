//! Presentation layer for pollster
//!
//! This crate contains CLI definitions and the formatters that render
//! the index, detail, results and admin views.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{AdminCommand, Cli, Command, OutputArg, PublishedArg};
pub use output::console::ConsoleFormatter;
pub use output::formatter::PollFormatter;
pub use output::json::JsonFormatter;
