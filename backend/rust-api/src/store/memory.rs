use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProblemMutation, RecordStore, StoreError};
use crate::models::{Problem, StudySession};

#[derive(Default)]
struct Records {
    problems: Vec<Problem>,
    sessions: Vec<StudySession>,
}

/// Process-local store. Contents vanish on restart.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records, mostly for tests.
    pub fn seeded(problems: Vec<Problem>, sessions: Vec<StudySession>) -> Self {
        Self {
            records: RwLock::new(Records { problems, sessions }),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(self.records.read().await.problems.clone())
    }

    async fn get_problem(&self, id: &str) -> Result<Problem, StoreError> {
        self.records
            .read()
            .await
            .problems
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_problem(&self, problem: Problem) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        if guard.problems.iter().any(|p| p.id == problem.id) {
            return Err(StoreError::Conflict(format!(
                "problem {} already exists",
                problem.id
            )));
        }
        guard.problems.push(problem);
        Ok(())
    }

    async fn modify_problem(
        &self,
        id: &str,
        mutation: ProblemMutation,
    ) -> Result<Problem, StoreError> {
        let mut guard = self.records.write().await;
        let problem = guard
            .problems
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        mutation(problem);
        Ok(problem.clone())
    }

    async fn delete_problem(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        let before = guard.problems.len();
        guard.problems.retain(|p| p.id != id);
        if guard.problems.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<StudySession>, StoreError> {
        Ok(self.records.read().await.sessions.clone())
    }

    async fn insert_session(&self, session: StudySession) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        if guard.sessions.iter().any(|s| s.id == session.id) {
            return Err(StoreError::Conflict(format!(
                "session {} already exists",
                session.id
            )));
        }
        guard.sessions.push(session);
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        let before = guard.sessions.len();
        guard.sessions.retain(|s| s.id != id);
        if guard.sessions.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn replace_all(
        &self,
        problems: Vec<Problem>,
        sessions: Option<Vec<StudySession>>,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.write().await;
        guard.problems = problems;
        if let Some(sessions) = sessions {
            guard.sessions = sessions;
        }
        Ok(())
    }
}
