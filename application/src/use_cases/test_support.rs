//! Test doubles shared by the use case tests.

use crate::ports::audit_logger::{AuditLogger, PollEvent};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pollster_domain::{
    Choice, ChoiceId, PollRepository, PollText, Question, QuestionId, StoreError,
};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    last_id: u64,
}

/// Minimal repository backed by a single mutex.
#[derive(Default)]
pub struct FakePollRepository {
    tables: Mutex<Tables>,
}

fn sort_desc(questions: &mut [Question]) {
    questions.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl FakePollRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a question published `days` away from `now` (negative for the past).
    pub async fn question(&self, text: &str, now: DateTime<Utc>, days: i64) -> QuestionId {
        self.create_question(PollText::parse(text).unwrap(), now + Duration::days(days))
            .await
            .unwrap()
    }

    pub async fn choice(&self, question_id: QuestionId, text: &str) -> ChoiceId {
        self.create_choice(question_id, PollText::parse(text).unwrap())
            .await
            .unwrap()
    }

    pub fn votes(&self, choice_id: ChoiceId) -> u64 {
        let tables = self.tables.lock().unwrap();
        tables
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .map(|c| c.votes)
            .unwrap()
    }

    pub fn total_votes(&self) -> u64 {
        let tables = self.tables.lock().unwrap();
        tables.choices.iter().map(|c| c.votes).sum()
    }
}

#[async_trait]
impl PollRepository for FakePollRepository {
    async fn create_question(
        &self,
        text: PollText,
        published_at: DateTime<Utc>,
    ) -> Result<QuestionId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.last_id += 1;
        let id = QuestionId::new(tables.last_id);
        tables.questions.push(Question::new(id, text, published_at));
        Ok(id)
    }

    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: PollText,
    ) -> Result<ChoiceId, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(StoreError::QuestionNotFound(question_id));
        }
        tables.last_id += 1;
        let id = ChoiceId::new(tables.last_id);
        tables.choices.push(Choice::new(id, question_id, text));
        Ok(id)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .questions
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or(StoreError::QuestionNotFound(id))
    }

    async fn get_choice(&self, id: ChoiceId) -> Result<Choice, StoreError> {
        let tables = self.tables.lock().unwrap();
        tables
            .choices
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::ChoiceNotFound(id))
    }

    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .choices
            .iter()
            .filter(|c| c.belongs_to(question_id))
            .cloned()
            .collect())
    }

    async fn list_questions_ordered_by_published_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions = self.all_questions().await?;
        questions.truncate(limit);
        Ok(questions)
    }

    async fn list_questions_published_until(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = self
            .all_questions()
            .await?
            .into_iter()
            .filter(|q| q.published_at <= cutoff)
            .collect();
        questions.truncate(limit);
        Ok(questions)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let mut questions = self.tables.lock().unwrap().questions.clone();
        sort_desc(&mut questions);
        Ok(questions)
    }

    async fn increment_choice_votes(&self, choice_id: ChoiceId) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let choice = tables
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id)
            .ok_or(StoreError::ChoiceNotFound(choice_id))?;
        choice.votes += 1;
        Ok(choice.votes)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        text: Option<PollText>,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Question, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let question = tables
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::QuestionNotFound(id))?;
        if let Some(text) = text {
            question.text = text;
        }
        if let Some(published_at) = published_at {
            question.published_at = published_at;
        }
        Ok(question.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        if tables.questions.len() == before {
            return Err(StoreError::QuestionNotFound(id));
        }
        tables.choices.retain(|c| !c.belongs_to(id));
        Ok(())
    }

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.choices.len();
        tables.choices.retain(|c| c.id != id);
        if tables.choices.len() == before {
            return Err(StoreError::ChoiceNotFound(id));
        }
        Ok(())
    }
}

/// Audit logger that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingAuditLogger {
    events: Mutex<Vec<PollEvent>>,
}

impl RecordingAuditLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }

    pub fn events(&self) -> Vec<PollEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAuditLogger {
    fn log(&self, event: PollEvent) {
        self.events.lock().unwrap().push(event);
    }
}
