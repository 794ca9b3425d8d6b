//! In-memory poll store.
//!
//! Questions and choices live in two ordered maps behind one
//! `tokio::sync::RwLock`. Vote counters are `AtomicU64`s, so an increment
//! only needs the shared read lock and a single `fetch_add`: concurrent
//! votes never lose an update and never wait on each other.

use super::snapshot::PollSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pollster_domain::{
    Choice, ChoiceId, PollRepository, PollText, Question, QuestionId, StoreError,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

struct ChoiceRecord {
    question_id: QuestionId,
    text: PollText,
    votes: AtomicU64,
}

impl ChoiceRecord {
    fn to_choice(&self, id: ChoiceId) -> Choice {
        Choice::new(id, self.question_id, self.text.clone())
            .with_votes(self.votes.load(Ordering::Acquire))
    }
}

struct Tables {
    questions: BTreeMap<QuestionId, Question>,
    choices: BTreeMap<ChoiceId, ChoiceRecord>,
    next_question_id: QuestionId,
    next_choice_id: ChoiceId,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            questions: BTreeMap::new(),
            choices: BTreeMap::new(),
            next_question_id: QuestionId::new(1),
            next_choice_id: ChoiceId::new(1),
        }
    }
}

impl Tables {
    fn sorted_questions(&self, keep: impl Fn(&Question) -> bool) -> Vec<Question> {
        let mut questions: Vec<Question> = self
            .questions
            .values()
            .filter(|q| keep(q))
            .cloned()
            .collect();
        questions.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        questions
    }
}

/// Poll store kept entirely in process memory.
#[derive(Default)]
pub struct InMemoryPollStore {
    tables: RwLock<Tables>,
}

impl InMemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, checking its referential integrity.
    pub fn from_snapshot(snapshot: PollSnapshot) -> Result<Self, StoreError> {
        let mut tables = Tables::default();

        for question in snapshot.questions {
            let id = question.id;
            if tables.questions.insert(id, question).is_some() {
                return Err(StoreError::Constraint(format!("duplicate question id {id}")));
            }
        }
        for choice in snapshot.choices {
            if !tables.questions.contains_key(&choice.question_id) {
                return Err(StoreError::Constraint(format!(
                    "choice {} refers to missing question {}",
                    choice.id, choice.question_id
                )));
            }
            let record = ChoiceRecord {
                question_id: choice.question_id,
                text: choice.text,
                votes: AtomicU64::new(choice.votes),
            };
            if tables.choices.insert(choice.id, record).is_some() {
                return Err(StoreError::Constraint(format!(
                    "duplicate choice id {}",
                    choice.id
                )));
            }
        }

        let after_questions = tables
            .questions
            .keys()
            .next_back()
            .map_or(QuestionId::new(1), |id| id.next());
        let after_choices = tables
            .choices
            .keys()
            .next_back()
            .map_or(ChoiceId::new(1), |id| id.next());
        tables.next_question_id = snapshot.next_question_id.max(after_questions);
        tables.next_choice_id = snapshot.next_choice_id.max(after_choices);

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// A consistent copy of every record.
    pub async fn snapshot(&self) -> PollSnapshot {
        let tables = self.tables.read().await;
        PollSnapshot {
            next_question_id: tables.next_question_id,
            next_choice_id: tables.next_choice_id,
            questions: tables.questions.values().cloned().collect(),
            choices: tables
                .choices
                .iter()
                .map(|(id, record)| record.to_choice(*id))
                .collect(),
        }
    }
}

#[async_trait]
impl PollRepository for InMemoryPollStore {
    async fn create_question(
        &self,
        text: PollText,
        published_at: DateTime<Utc>,
    ) -> Result<QuestionId, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_question_id;
        tables.next_question_id = id.next();
        tables
            .questions
            .insert(id, Question::new(id, text, published_at));
        debug!("Stored question {}", id);
        Ok(id)
    }

    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: PollText,
    ) -> Result<ChoiceId, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&question_id) {
            return Err(StoreError::QuestionNotFound(question_id));
        }
        let id = tables.next_choice_id;
        tables.next_choice_id = id.next();
        tables.choices.insert(
            id,
            ChoiceRecord {
                question_id,
                text,
                votes: AtomicU64::new(0),
            },
        );
        Ok(id)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StoreError> {
        let tables = self.tables.read().await;
        tables
            .questions
            .get(&id)
            .cloned()
            .ok_or(StoreError::QuestionNotFound(id))
    }

    async fn get_choice(&self, id: ChoiceId) -> Result<Choice, StoreError> {
        let tables = self.tables.read().await;
        tables
            .choices
            .get(&id)
            .map(|record| record.to_choice(id))
            .ok_or(StoreError::ChoiceNotFound(id))
    }

    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .choices
            .iter()
            .filter(|(_, record)| record.question_id == question_id)
            .map(|(id, record)| record.to_choice(*id))
            .collect())
    }

    async fn list_questions_ordered_by_published_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        let mut questions = tables.sorted_questions(|_| true);
        questions.truncate(limit);
        Ok(questions)
    }

    async fn list_questions_published_until(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        let mut questions = tables.sorted_questions(move |q| q.published_at <= cutoff);
        questions.truncate(limit);
        Ok(questions)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_questions(|_| true))
    }

    async fn increment_choice_votes(&self, choice_id: ChoiceId) -> Result<u64, StoreError> {
        let tables = self.tables.read().await;
        let record = tables
            .choices
            .get(&choice_id)
            .ok_or(StoreError::ChoiceNotFound(choice_id))?;
        Ok(record.votes.fetch_add(1, Ordering::AcqRel) + 1)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        text: Option<PollText>,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().await;
        let question = tables
            .questions
            .get_mut(&id)
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
        let mut tables = self.tables.write().await;
        if tables.questions.remove(&id).is_none() {
            return Err(StoreError::QuestionNotFound(id));
        }
        let before = tables.choices.len();
        tables.choices.retain(|_, record| record.question_id != id);
        debug!(
            "Deleted question {} and {} choices",
            id,
            before - tables.choices.len()
        );
        Ok(())
    }

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .choices
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ChoiceNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pollster_application::{CastVoteUseCase, QueryPollsUseCase, VoteError, VoteRequest};
    use std::sync::Arc;

    fn text(s: &str) -> PollText {
        PollText::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = InMemoryPollStore::new();
        let q1 = store.create_question(text("One"), now()).await.unwrap();
        let q2 = store.create_question(text("Two"), now()).await.unwrap();
        assert_eq!(q1, QuestionId::new(1));
        assert_eq!(q2, QuestionId::new(2));
    }

    #[tokio::test]
    async fn test_create_choice_requires_question() {
        let store = InMemoryPollStore::new();
        let err = store
            .create_choice(QuestionId::new(3), text("Orphan"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::QuestionNotFound(QuestionId::new(3)));
    }

    #[tokio::test]
    async fn test_ordering_ties_broken_by_id_desc() {
        let store = InMemoryPollStore::new();
        let older = store
            .create_question(text("Older"), now() - Duration::days(2))
            .await
            .unwrap();
        let a = store.create_question(text("A"), now()).await.unwrap();
        let b = store.create_question(text("B"), now()).await.unwrap();

        let ids: Vec<_> = store
            .list_questions_ordered_by_published_desc(10)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec![b, a, older]);

        let top = store.list_questions_ordered_by_published_desc(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, b);
    }

    #[tokio::test]
    async fn test_published_until_filters_before_limit() {
        let store = InMemoryPollStore::new();
        for day in 1..=3 {
            store
                .create_question(text("Future"), now() + Duration::days(day))
                .await
                .unwrap();
        }
        let past = store
            .create_question(text("Past"), now() - Duration::days(1))
            .await
            .unwrap();

        let visible = store.list_questions_published_until(now(), 2).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, past);
    }

    #[tokio::test]
    async fn test_increment_missing_choice() {
        let store = InMemoryPollStore::new();
        let err = store
            .increment_choice_votes(ChoiceId::new(1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_increments_do_not_lose_updates() {
        let store = Arc::new(InMemoryPollStore::new());
        let q = store.create_question(text("Busy"), now()).await.unwrap();
        let c = store.create_choice(q, text("Popular")).await.unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment_choice_votes(c).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.get_choice(c).await.unwrap().votes, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_cast_votes_are_all_counted() {
        let store = Arc::new(InMemoryPollStore::new());
        let q = store
            .create_question(text("Busy"), now() - Duration::days(1))
            .await
            .unwrap();
        let c = store.create_choice(q, text("Popular")).await.unwrap();
        let voting = CastVoteUseCase::new(store.clone());

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let voting = voting.clone();
                let request = VoteRequest::new(q).with_choice(c.to_string());
                tokio::spawn(async move { voting.execute(request, now()).await })
            })
            .collect();
        for handle in futures::future::join_all(handles).await {
            handle.unwrap().unwrap();
        }

        assert_eq!(store.get_choice(c).await.unwrap().votes, 100);
    }

    #[tokio::test]
    async fn test_vote_for_other_questions_choice_changes_nothing() {
        let store = Arc::new(InMemoryPollStore::new());
        let past = now() - Duration::days(1);
        let q1 = store.create_question(text("One"), past).await.unwrap();
        let q2 = store.create_question(text("Two"), past).await.unwrap();
        let c1 = store.create_choice(q1, text("A")).await.unwrap();
        let c2 = store.create_choice(q2, text("B")).await.unwrap();

        let err = CastVoteUseCase::new(store.clone())
            .execute(VoteRequest::new(q1).with_choice(c2.to_string()), now())
            .await
            .unwrap_err();

        assert!(matches!(err, VoteError::InvalidChoice(_)));
        assert_eq!(store.get_choice(c1).await.unwrap().votes, 0);
        assert_eq!(store.get_choice(c2).await.unwrap().votes, 0);
    }

    #[tokio::test]
    async fn test_latest_questions_scenario() {
        let store = Arc::new(InMemoryPollStore::new());
        let a = store
            .create_question(text("Past question."), now() - Duration::days(30))
            .await
            .unwrap();
        store
            .create_question(text("Future question."), now() + Duration::days(30))
            .await
            .unwrap();

        let latest = QueryPollsUseCase::new(store.clone())
            .latest_questions(now())
            .await
            .unwrap();
        assert_eq!(latest.iter().map(|q| q.id).collect::<Vec<_>>(), vec![a]);
    }

    #[tokio::test]
    async fn test_update_question_fields() {
        let store = InMemoryPollStore::new();
        let q = store.create_question(text("Draft"), now()).await.unwrap();
        let later = now() + Duration::days(1);

        let updated = store.update_question(q, None, Some(later)).await.unwrap();
        assert_eq!(updated.text.as_str(), "Draft");
        assert_eq!(updated.published_at, later);
        assert_eq!(store.get_question(q).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_question_cascades_only_its_choices() {
        let store = InMemoryPollStore::new();
        let q1 = store.create_question(text("One"), now()).await.unwrap();
        let q2 = store.create_question(text("Two"), now()).await.unwrap();
        store.create_choice(q1, text("A")).await.unwrap();
        store.create_choice(q1, text("B")).await.unwrap();
        let keep = store.create_choice(q2, text("C")).await.unwrap();

        store.delete_question(q1).await.unwrap();

        assert!(store.get_question(q1).await.is_err());
        assert!(store.list_choices(q1).await.unwrap().is_empty());
        assert!(store.get_choice(keep).await.is_ok());
        assert_eq!(
            store.delete_question(q1).await.unwrap_err(),
            StoreError::QuestionNotFound(q1)
        );
    }

    #[tokio::test]
    async fn test_delete_choice() {
        let store = InMemoryPollStore::new();
        let q = store.create_question(text("One"), now()).await.unwrap();
        let c = store.create_choice(q, text("A")).await.unwrap();

        store.delete_choice(c).await.unwrap();
        assert_eq!(
            store.delete_choice(c).await.unwrap_err(),
            StoreError::ChoiceNotFound(c)
        );
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_keeps_counters_and_ids() {
        let store = InMemoryPollStore::new();
        let q = store.create_question(text("One"), now()).await.unwrap();
        let c = store.create_choice(q, text("A")).await.unwrap();
        store.increment_choice_votes(c).await.unwrap();
        store.delete_question(q).await.unwrap();
        let q2 = store.create_question(text("Two"), now()).await.unwrap();
        let c2 = store.create_choice(q2, text("B")).await.unwrap();
        store.increment_choice_votes(c2).await.unwrap();

        let restored = InMemoryPollStore::from_snapshot(store.snapshot().await).unwrap();

        assert_eq!(restored.get_choice(c2).await.unwrap().votes, 1);
        let q3 = restored.create_question(text("Three"), now()).await.unwrap();
        assert_eq!(q3, QuestionId::new(3));
    }

    #[test]
    fn test_snapshot_with_dangling_choice_is_rejected() {
        let snapshot = PollSnapshot {
            next_question_id: QuestionId::new(1),
            next_choice_id: ChoiceId::new(2),
            questions: vec![],
            choices: vec![Choice::new(ChoiceId::new(1), QuestionId::new(9), text("A"))],
        };
        assert!(matches!(
            InMemoryPollStore::from_snapshot(snapshot),
            Err(StoreError::Constraint(_))
        ));
    }
}
