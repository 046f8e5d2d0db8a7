use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::metrics::SESSIONS_RECORDED_TOTAL;
use crate::models::{CreateSessionRequest, StudySession};
use crate::services::AppState;
use crate::store::{RecordStore, StoreError};
use crate::utils::time::Clock;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Study session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(StoreError),
}

pub struct SessionService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl SessionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            clock: state.clock,
        }
    }

    /// Newest first.
    pub async fn list_sessions(&self) -> Result<Vec<StudySession>, SessionError> {
        let mut sessions = self.store.list_sessions().await.map_err(SessionError::Store)?;
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    pub async fn create_session(
        &self,
        req: CreateSessionRequest,
    ) -> Result<StudySession, SessionError> {
        let session = StudySession::from_request(Uuid::new_v4().to_string(), req, self.clock.now());

        self.store
            .insert_session(session.clone())
            .await
            .map_err(SessionError::Store)?;

        SESSIONS_RECORDED_TOTAL.inc();
        tracing::info!(
            "Study session recorded: {} ({} problems, {} min)",
            session.id,
            session.problems_solved.len(),
            session.time_spent
        );

        Ok(session)
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        self.store.delete_session(id).await.map_err(|e| match e {
            StoreError::NotFound => SessionError::NotFound(id.to_string()),
            other => SessionError::Store(other),
        })?;

        tracing::info!("Study session deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_create_defaults_date_and_lists_newest_first() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 20, 0, 0).unwrap();
        let state = AppState::with_store(
            Config::default(),
            Arc::new(InMemoryStore::new()),
            Clock::fixed(now),
        );
        let service = SessionService::new(&state);

        let older = service
            .create_session(CreateSessionRequest {
                date: Some(now - Duration::days(2)),
                problems_solved: vec!["p1".into()],
                time_spent: 40,
                notes: None,
            })
            .await
            .unwrap();
        let today = service
            .create_session(CreateSessionRequest {
                date: None,
                problems_solved: vec![],
                time_spent: 15,
                notes: Some("   ".into()),
            })
            .await
            .unwrap();

        assert_eq!(today.date, now);
        assert_eq!(today.notes, None);

        let listed: Vec<String> = service
            .list_sessions()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, vec![today.id, older.id]);
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let state = AppState::new(Config::default());
        let err = SessionService::new(&state)
            .delete_session("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
