use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::metrics::IMPORTS_TOTAL;
use crate::models::{
    transfer::{ExportDocument, ImportSummary, ProblemRecord, EXPORT_FORMAT_VERSION},
    Problem, StudySession,
};
use crate::services::AppState;
use crate::store::{RecordStore, StoreError};
use crate::utils::time::Clock;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid data format: missing problems array")]
    MissingProblems,

    #[error("Some problems have invalid structure: {valid} of {total} valid")]
    InvalidProblems { valid: usize, total: usize },

    #[error("Duplicate problem id: {0}")]
    DuplicateProblemId(String),

    #[error("Some sessions have invalid structure: {valid} of {total} valid")]
    InvalidSessions { valid: usize, total: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct TransferService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl TransferService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            clock: state.clock,
        }
    }

    pub async fn export(&self) -> Result<ExportDocument, StoreError> {
        let problems = self.store.list_problems().await?;
        let sessions = self.store.list_sessions().await?;

        tracing::info!(
            "Exporting {} problems and {} sessions",
            problems.len(),
            sessions.len()
        );

        Ok(ExportDocument {
            problems,
            sessions,
            export_date: self.clock.now(),
            version: EXPORT_FORMAT_VERSION.to_string(),
        })
    }

    /// Replaces the stored records with the document's contents.
    ///
    /// All or nothing: a single malformed record rejects the whole document
    /// and the store is left untouched. Sessions are only replaced when the
    /// document carries a `sessions` array.
    pub async fn import(&self, document: &Value) -> Result<ImportSummary, ImportError> {
        let result = self.import_inner(document).await;
        let outcome = if result.is_ok() { "success" } else { "rejected" };
        IMPORTS_TOTAL.with_label_values(&[outcome]).inc();
        result
    }

    async fn import_inner(&self, document: &Value) -> Result<ImportSummary, ImportError> {
        let raw_problems = document
            .get("problems")
            .and_then(Value::as_array)
            .ok_or(ImportError::MissingProblems)?;

        let now = self.clock.now();
        let problems: Vec<Problem> = raw_problems
            .iter()
            .filter_map(|raw| parse_problem(raw, now))
            .collect();

        if problems.len() != raw_problems.len() {
            tracing::warn!(
                "Import rejected: {} of {} problems are valid",
                problems.len(),
                raw_problems.len()
            );
            return Err(ImportError::InvalidProblems {
                valid: problems.len(),
                total: raw_problems.len(),
            });
        }

        let mut seen = HashSet::with_capacity(problems.len());
        if let Some(duplicate) = problems.iter().find(|p| !seen.insert(p.id.as_str())) {
            tracing::warn!("Import rejected: duplicate problem id {}", duplicate.id);
            return Err(ImportError::DuplicateProblemId(duplicate.id.clone()));
        }

        let sessions = match document.get("sessions") {
            Some(Value::Array(raw_sessions)) => {
                let sessions: Vec<StudySession> = raw_sessions
                    .iter()
                    .filter_map(|raw| serde_json::from_value(raw.clone()).ok())
                    .collect();
                if sessions.len() != raw_sessions.len() {
                    tracing::warn!(
                        "Import rejected: {} of {} sessions are valid",
                        sessions.len(),
                        raw_sessions.len()
                    );
                    return Err(ImportError::InvalidSessions {
                        valid: sessions.len(),
                        total: raw_sessions.len(),
                    });
                }
                Some(sessions)
            }
            _ => None,
        };

        let summary = ImportSummary {
            problems: problems.len(),
            sessions: sessions.as_ref().map_or(0, Vec::len),
        };

        self.store.replace_all(problems, sessions).await?;

        tracing::info!(
            "Imported {} problems and {} sessions",
            summary.problems,
            summary.sessions
        );

        Ok(summary)
    }
}

/// Requires id, title, a known difficulty and a category array.
fn parse_problem(raw: &Value, now: DateTime<Utc>) -> Option<Problem> {
    serde_json::from_value::<ProblemRecord>(raw.clone())
        .ok()
        .filter(ProblemRecord::is_structurally_valid)
        .map(|record| record.into_problem(now))
}
