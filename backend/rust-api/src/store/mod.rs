use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Problem, StudySession};

mod memory;

pub use memory::InMemoryStore;

/// Errors surfaced by record store backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// In-place edit applied to a stored problem under the store's write lock.
pub type ProblemMutation = Box<dyn FnOnce(&mut Problem) + Send>;

/// Holds problems and study sessions. Reads hand out owned snapshots in
/// insertion order, so callers never keep a lock.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no problem has this id.
    async fn get_problem(&self, id: &str) -> Result<Problem, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the id is already taken.
    async fn insert_problem(&self, problem: Problem) -> Result<(), StoreError>;

    /// Applies `mutation` atomically and returns the updated record.
    async fn modify_problem(
        &self,
        id: &str,
        mutation: ProblemMutation,
    ) -> Result<Problem, StoreError>;

    async fn delete_problem(&self, id: &str) -> Result<(), StoreError>;

    async fn list_sessions(&self) -> Result<Vec<StudySession>, StoreError>;

    async fn insert_session(&self, session: StudySession) -> Result<(), StoreError>;

    async fn delete_session(&self, id: &str) -> Result<(), StoreError>;

    /// Swaps the problem collection and, when given, the session collection
    /// in one step.
    async fn replace_all(
        &self,
        problems: Vec<Problem>,
        sessions: Option<Vec<StudySession>>,
    ) -> Result<(), StoreError>;
}
