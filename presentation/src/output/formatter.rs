//! Output formatter trait

use pollster_application::{AdminQuery, AdminQuestionRow, QuestionDetail, VoteOutcome};
use pollster_domain::{OutputFormat, PollResults, Question};

/// Trait for rendering the poll views
pub trait PollFormatter {
    /// The index view: latest published questions
    fn format_index(&self, questions: &[Question]) -> String;

    /// The detail view, optionally with an error from a rejected vote
    fn format_detail(&self, detail: &QuestionDetail, error: Option<&str>) -> String;

    /// The results view
    fn format_results(&self, results: &PollResults) -> String;

    /// Confirmation of a recorded vote, followed by the results
    fn format_vote(&self, outcome: &VoteOutcome, results: &PollResults) -> String;

    /// The admin listing
    fn format_admin_list(&self, rows: &[AdminQuestionRow], query: &AdminQuery) -> String;

    /// A short status line (admin deletions and the like)
    fn format_notice(&self, message: &str) -> String;

    /// A failure shown to the user
    fn format_error(&self, message: &str) -> String;
}

/// Pick the formatter for an output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn PollFormatter> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::json::JsonFormatter),
    }
}
