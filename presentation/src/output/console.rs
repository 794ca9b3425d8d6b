//! Console output formatter for poll views

use crate::output::formatter::PollFormatter;
use colored::Colorize;
use pollster_application::{AdminQuery, AdminQuestionRow, QuestionDetail, VoteOutcome};
use pollster_domain::util::preview;
use pollster_domain::{PollResults, PublishedFilter, Question};

const QUESTION_COLUMN: usize = 40;

/// Formats poll views for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the index view
    pub fn index(questions: &[Question]) -> String {
        if questions.is_empty() {
            return "No polls are available.\n".to_string();
        }

        let mut output = String::new();
        for question in questions {
            output.push_str(&format!(
                "{} {}\n",
                format!("[{}]", question.id).dimmed(),
                question.text
            ));
        }
        output
    }

    /// Format the detail view
    pub fn detail(detail: &QuestionDetail, error: Option<&str>) -> String {
        let mut output = Self::title(&detail.question);

        if let Some(message) = error {
            output.push_str(&format!("{}\n", message.red().bold()));
        }

        if detail.choices.is_empty() {
            output.push_str(&format!("{}\n", "This poll has no choices yet.".dimmed()));
        }
        for choice in &detail.choices {
            output.push_str(&format!(
                "  {} {}\n",
                format!("[{}]", choice.id).yellow(),
                choice.text
            ));
        }
        output
    }

    /// Format the results view
    pub fn results(results: &PollResults) -> String {
        let mut output = Self::title(&results.question);

        let width = results
            .choices
            .iter()
            .map(|c| c.text.as_str().chars().count())
            .max()
            .unwrap_or(0);

        for choice in &results.choices {
            let leading = results.leaders().any(|c| c.id == choice.id);
            let line = format!(
                "  {:<width$}  {} ({:.1}%)",
                choice.text.as_str(),
                Self::votes(choice.votes),
                results.share(choice) * 100.0,
                width = width
            );
            if leading {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Total:".cyan().bold(),
            Self::votes(results.total_votes)
        ));
        output
    }

    /// Format a recorded vote followed by the results
    pub fn vote(outcome: &VoteOutcome, results: &PollResults) -> String {
        let mut output = format!(
            "{}\n\n",
            format!("Vote recorded for choice {}.", outcome.choice_id).green()
        );
        output.push_str(&Self::results(results));
        output
    }

    /// Format the admin listing as a table
    pub fn admin_list(rows: &[AdminQuestionRow], query: &AdminQuery) -> String {
        let mut output = String::new();

        let mut filters = Vec::new();
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            filters.push(format!("search \"{}\"", search.trim()));
        }
        if query.published != PublishedFilter::Any {
            filters.push(format!("published: {}", query.published.label()));
        }
        if !filters.is_empty() {
            output.push_str(&format!("{}\n", filters.join(", ").dimmed()));
        }

        if rows.is_empty() {
            output.push_str("No questions match.\n");
            return output;
        }

        output.push_str(&format!(
            "{}\n",
            format!(
                "{:>4}  {:<col$}  {:<20}  {:<8}  {:>7}  {:>6}",
                "ID",
                "Question",
                "Published",
                "Recent",
                "Choices",
                "Votes",
                col = QUESTION_COLUMN
            )
            .bold()
        ));

        for row in rows {
            let recent = if row.published_recently { "yes" } else { "no" };
            output.push_str(&format!(
                "{:>4}  {:<col$}  {:<20}  {:<8}  {:>7}  {:>6}\n",
                row.question.id.get(),
                preview(row.question.text.as_str(), QUESTION_COLUMN),
                row.question
                    .published_at
                    .format("%Y-%m-%d %H:%M UTC")
                    .to_string(),
                recent,
                row.choice_count,
                row.total_votes,
                col = QUESTION_COLUMN
            ));
        }

        output.push_str(&format!(
            "\n{}\n",
            match rows.len() {
                1 => "1 question".to_string(),
                n => format!("{} questions", n),
            }
            .dimmed()
        ));
        output
    }

    fn title(question: &Question) -> String {
        format!("{}\n\n", question.text.as_str().cyan().bold())
    }

    fn votes(count: u64) -> String {
        if count == 1 {
            "1 vote".to_string()
        } else {
            format!("{} votes", count)
        }
    }
}

impl PollFormatter for ConsoleFormatter {
    fn format_index(&self, questions: &[Question]) -> String {
        Self::index(questions)
    }

    fn format_detail(&self, detail: &QuestionDetail, error: Option<&str>) -> String {
        Self::detail(detail, error)
    }

    fn format_results(&self, results: &PollResults) -> String {
        Self::results(results)
    }

    fn format_vote(&self, outcome: &VoteOutcome, results: &PollResults) -> String {
        Self::vote(outcome, results)
    }

    fn format_admin_list(&self, rows: &[AdminQuestionRow], query: &AdminQuery) -> String {
        Self::admin_list(rows, query)
    }

    fn format_notice(&self, message: &str) -> String {
        format!("{}\n", message.green())
    }

    fn format_error(&self, message: &str) -> String {
        format!("{} {}\n", "Error:".red().bold(), message)
    }
}
