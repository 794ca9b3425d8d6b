//! JSON output formatter for poll views

use crate::output::formatter::PollFormatter;
use pollster_application::{AdminQuery, AdminQuestionRow, QuestionDetail, VoteOutcome};
use pollster_domain::{PollResults, Question};
use serde::Serialize;
use serde_json::json;

/// Formats poll views as pretty-printed JSON documents
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &impl Serialize) -> String {
        let mut output = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
        output.push('\n');
        output
    }
}

impl PollFormatter for JsonFormatter {
    fn format_index(&self, questions: &[Question]) -> String {
        Self::render(&json!({ "questions": questions }))
    }

    fn format_detail(&self, detail: &QuestionDetail, error: Option<&str>) -> String {
        match error {
            Some(message) => Self::render(&json!({ "error": message, "detail": detail })),
            None => Self::render(detail),
        }
    }

    fn format_results(&self, results: &PollResults) -> String {
        Self::render(results)
    }

    fn format_vote(&self, outcome: &VoteOutcome, results: &PollResults) -> String {
        Self::render(&json!({ "vote": outcome, "results": results }))
    }

    fn format_admin_list(&self, rows: &[AdminQuestionRow], query: &AdminQuery) -> String {
        Self::render(&json!({
            "search": query.search,
            "published": query.published,
            "questions": rows,
        }))
    }

    fn format_notice(&self, message: &str) -> String {
        Self::render(&json!({ "message": message }))
    }

    fn format_error(&self, message: &str) -> String {
        Self::render(&json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pollster_domain::{Choice, ChoiceId, PollText, QuestionId};
    use serde_json::Value;

    fn results() -> PollResults {
        let question = Question::new(
            QuestionId::new(1),
            PollText::parse("What's up?").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap(),
        );
        let choice = Choice::new(
            ChoiceId::new(4),
            QuestionId::new(1),
            PollText::parse("Not much").unwrap(),
        )
        .with_votes(3);
        PollResults::new(question, vec![choice])
    }

    #[test]
    fn test_results_document() {
        let value: Value = serde_json::from_str(&JsonFormatter.format_results(&results())).unwrap();
        assert_eq!(value["question"]["text"], "What's up?");
        assert_eq!(value["choices"][0]["votes"], 3);
        assert_eq!(value["total_votes"], 3);
    }

    #[test]
    fn test_empty_index_document() {
        let value: Value = serde_json::from_str(&JsonFormatter.format_index(&[])).unwrap();
        assert_eq!(value["questions"], serde_json::json!([]));
    }

    #[test]
    fn test_detail_with_error() {
        let results = results();
        let detail = QuestionDetail::new(results.question.clone(), results.choices.clone());
        let output = JsonFormatter.format_detail(&detail, Some("You didn't select a choice."));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "You didn't select a choice.");
        assert_eq!(value["detail"]["choices"][0]["id"], 4);
    }
}
