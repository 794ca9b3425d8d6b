//! JSON file backed poll store.
//!
//! The file is the only source of truth. Reads load the current snapshot;
//! every change runs as a transaction that takes an exclusive advisory
//! lock on a sibling `.lock` file, re-reads the snapshot, applies the
//! change to an [`InMemoryPollStore`] built from it and writes the result
//! back through a `.tmp` file and a rename. Several processes sharing one
//! file therefore never lose each other's updates, and a change whose
//! write fails leaves nothing behind.

use super::memory::InMemoryPollStore;
use super::snapshot::PollSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use pollster_domain::{
    Choice, ChoiceId, PollRepository, PollText, Question, QuestionId, StoreError,
};
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Error, Debug)]
enum SnapshotFileError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not lock {path}: {source}")]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid poll snapshot: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<SnapshotFileError> for StoreError {
    fn from(error: SnapshotFileError) -> Self {
        StoreError::Backend(error.to_string())
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Exclusive advisory lock, released on drop.
struct FileLock {
    file: File,
}

impl FileLock {
    /// Block the current thread until the lock is held.
    fn acquire(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// A change in progress. Dropping it without [`commit`](Self::commit)
/// discards the change.
struct Transaction<'a> {
    store: InMemoryPollStore,
    owner: &'a JsonFilePollStore,
    _lock: FileLock,
    _guard: MutexGuard<'a, ()>,
}

impl Transaction<'_> {
    async fn commit(self) -> Result<(), StoreError> {
        let snapshot = self.store.snapshot().await;
        self.owner.write_snapshot(&snapshot).await
    }
}

/// Poll store persisted as a single JSON document.
pub struct JsonFilePollStore {
    path: PathBuf,
    lock_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePollStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// An existing file is checked right away, so a corrupt snapshot is
    /// reported here rather than on first use.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let store = Self {
            lock_path: sibling(&path, ".lock"),
            path,
            write_lock: Mutex::new(()),
        };

        let snapshot = store.read_snapshot().await?;
        info!(
            "Opened {} with {} questions and {} choices",
            store.path.display(),
            snapshot.questions.len(),
            snapshot.choices.len()
        );
        InMemoryPollStore::from_snapshot(snapshot)?;
        Ok(store)
    }

    /// Get the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<PollSnapshot, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                SnapshotFileError::Decode {
                    path: self.path.clone(),
                    source,
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No poll file at {}, starting empty", self.path.display());
                Ok(PollSnapshot::default())
            }
            Err(source) => Err(SnapshotFileError::Read {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    /// The current file contents as a queryable store.
    async fn load(&self) -> Result<InMemoryPollStore, StoreError> {
        InMemoryPollStore::from_snapshot(self.read_snapshot().await?)
    }

    async fn write_snapshot(&self, snapshot: &PollSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(SnapshotFileError::from)?;
        let write_error = |source: std::io::Error| SnapshotFileError::Write {
            path: self.path.clone(),
            source,
        };

        let tmp = sibling(&self.path, ".tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn begin(&self) -> Result<Transaction<'_>, StoreError> {
        // One transaction per handle at a time; the file lock covers other handles.
        let guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                SnapshotFileError::Write {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let lock_path = self.lock_path.clone();
        let lock = tokio::task::spawn_blocking(move || FileLock::acquire(&lock_path))
            .await
            .map_err(|e| StoreError::Backend(format!("lock task failed: {e}")))?
            .map_err(|source| SnapshotFileError::Lock {
                path: self.lock_path.clone(),
                source,
            })?;

        Ok(Transaction {
            store: self.load().await?,
            owner: self,
            _lock: lock,
            _guard: guard,
        })
    }
}

#[async_trait]
impl PollRepository for JsonFilePollStore {
    async fn create_question(
        &self,
        text: PollText,
        published_at: DateTime<Utc>,
    ) -> Result<QuestionId, StoreError> {
        let tx = self.begin().await?;
        let id = tx.store.create_question(text, published_at).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: PollText,
    ) -> Result<ChoiceId, StoreError> {
        let tx = self.begin().await?;
        let id = tx.store.create_choice(question_id, text).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, StoreError> {
        self.load().await?.get_question(id).await
    }

    async fn get_choice(&self, id: ChoiceId) -> Result<Choice, StoreError> {
        self.load().await?.get_choice(id).await
    }

    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, StoreError> {
        self.load().await?.list_choices(question_id).await
    }

    async fn list_questions_ordered_by_published_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        self.load()
            .await?
            .list_questions_ordered_by_published_desc(limit)
            .await
    }

    async fn list_questions_published_until(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Question>, StoreError> {
        self.load()
            .await?
            .list_questions_published_until(cutoff, limit)
            .await
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.load().await?.all_questions().await
    }

    async fn increment_choice_votes(&self, choice_id: ChoiceId) -> Result<u64, StoreError> {
        let tx = self.begin().await?;
        let votes = tx.store.increment_choice_votes(choice_id).await?;
        tx.commit().await?;
        Ok(votes)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        text: Option<PollText>,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Question, StoreError> {
        let tx = self.begin().await?;
        let question = tx.store.update_question(id, text, published_at).await?;
        tx.commit().await?;
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StoreError> {
        let tx = self.begin().await?;
        tx.store.delete_question(id).await?;
        tx.commit().await
    }

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), StoreError> {
        let tx = self.begin().await?;
        tx.store.delete_choice(id).await?;
        tx.commit().await
    }
}
