//! Serialized form of a poll store.

use pollster_domain::{Choice, ChoiceId, Question, QuestionId};
use serde::{Deserialize, Serialize};

/// Every record of a store plus its id allocation state.
///
/// Keeping the next ids means identities of deleted records are never
/// handed out again after a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub next_question_id: QuestionId,
    pub next_choice_id: ChoiceId,
    pub questions: Vec<Question>,
    pub choices: Vec<Choice>,
}

impl Default for PollSnapshot {
    fn default() -> Self {
        Self {
            next_question_id: QuestionId::new(1),
            next_choice_id: ChoiceId::new(1),
            questions: Vec::new(),
            choices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let json = r#"{
            "next_question_id": 2,
            "next_choice_id": 3,
            "questions": [
                {"id": 1, "text": "What's up?", "published_at": "2024-05-15T12:00:00Z"}
            ],
            "choices": [
                {"id": 1, "question_id": 1, "text": "Not much", "votes": 4},
                {"id": 2, "question_id": 1, "text": "The sky", "votes": 0}
            ]
        }"#;

        let snapshot: PollSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.questions.len(), 1);
        assert_eq!(snapshot.choices[0].votes, 4);
        assert_eq!(snapshot.next_choice_id, ChoiceId::new(3));
    }

    #[test]
    fn test_invalid_text_is_rejected() {
        let json = r#"{
            "next_question_id": 2,
            "next_choice_id": 1,
            "questions": [{"id": 1, "text": "", "published_at": "2024-05-15T12:00:00Z"}],
            "choices": []
        }"#;
        assert!(serde_json::from_str::<PollSnapshot>(json).is_err());
    }
}
