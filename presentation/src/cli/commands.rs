//! CLI command definitions

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use pollster_domain::{ChoiceId, OutputFormat, PublishedFilter, QuestionId};
use std::path::PathBuf;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Publication-date filter for `admin list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PublishedArg {
    #[default]
    Any,
    Today,
    #[value(name = "past-7-days")]
    PastSevenDays,
    ThisMonth,
    ThisYear,
}

impl From<PublishedArg> for PublishedFilter {
    fn from(arg: PublishedArg) -> Self {
        match arg {
            PublishedArg::Any => PublishedFilter::Any,
            PublishedArg::Today => PublishedFilter::Today,
            PublishedArg::PastSevenDays => PublishedFilter::PastSevenDays,
            PublishedArg::ThisMonth => PublishedFilter::ThisMonth,
            PublishedArg::ThisYear => PublishedFilter::ThisYear,
        }
    }
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp such as 2024-05-15T12:00:00Z ({e})"))
}

/// CLI arguments for pollster
#[derive(Parser, Debug)]
#[command(name = "pollster")]
#[command(author, version, about = "Publish questions, collect votes and show the results")]
#[command(long_about = r#"
Pollster keeps a set of questions, each with its own choices, and lets
people vote on them.

A question becomes visible at its publication time. Until then it is
treated exactly like a question that does not exist.

Polls are saved to ./polls.json unless [store] path points elsewhere.
Set [store] in_memory = true to keep nothing between runs.

Configuration files are loaded from (in priority order):
1. POLLSTER_* environment variables
2. --config <path>     Explicit config file
3. ./pollster.toml     Project-level config
4. ~/.config/pollster/config.toml   Global config

Example:
  pollster admin add-question "What's up?" --choice "Not much" --choice "The sky"
  pollster index
  pollster vote 1 --choice 2
  pollster results 1
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides the configured one)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Evaluate visibility at this instant instead of the current time
    #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the most recently published questions
    Index,

    /// Show a question and its choices
    Detail { question_id: QuestionId },

    /// Show the vote tallies of a question
    Results { question_id: QuestionId },

    /// Vote for one of a question's choices
    Vote {
        question_id: QuestionId,

        /// Identifier of the chosen choice
        #[arg(short, long, value_name = "CHOICE_ID")]
        choice: Option<String>,
    },

    /// Manage questions and choices
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AdminCommand {
    /// List every question, including scheduled ones
    List {
        /// Case-insensitive search in the question text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show questions published in this period
        #[arg(long, value_enum, default_value_t = PublishedArg::Any)]
        published: PublishedArg,
    },

    /// Create a question, optionally with its choices
    AddQuestion {
        text: String,

        /// Publication time (defaults to now)
        #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
        published_at: Option<DateTime<Utc>>,

        /// Publication time as a day offset from now (negative for the past)
        #[arg(long, allow_negative_numbers = true, conflicts_with = "published_at")]
        days: Option<i64>,

        /// Choice text (can be specified multiple times)
        #[arg(short, long, value_name = "TEXT")]
        choice: Vec<String>,
    },

    /// Change a question's text or publication time
    EditQuestion {
        question_id: QuestionId,

        #[arg(long)]
        text: Option<String>,

        #[arg(long, value_name = "RFC3339", value_parser = parse_timestamp)]
        published_at: Option<DateTime<Utc>>,
    },

    /// Delete a question and all of its choices
    DeleteQuestion { question_id: QuestionId },

    /// Add a choice to a question
    AddChoice { question_id: QuestionId, text: String },

    /// Delete a single choice
    DeleteChoice { choice_id: ChoiceId },
}
