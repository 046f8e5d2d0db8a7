use std::sync::Arc;

use crate::metrics::STATS_COMPUTATIONS_TOTAL;
use crate::models::ProgressStats;
use crate::services::{statistics::compute_stats, AppState};
use crate::store::{RecordStore, StoreError};
use crate::utils::time::Clock;

/// Reads a snapshot from the store and runs the statistics engine over it.
/// Nothing is cached between calls.
pub struct StatsService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl StatsService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            clock: state.clock,
        }
    }

    pub async fn progress(&self) -> Result<ProgressStats, StoreError> {
        let problems = self.store.list_problems().await?;
        let sessions = self.store.list_sessions().await?;

        let stats = compute_stats(&problems, &sessions, self.clock.now());
        STATS_COMPUTATIONS_TOTAL.inc();

        tracing::debug!(
            "Computed progress stats: {} problems, {} sessions, streak={}",
            stats.total_problems,
            sessions.len(),
            stats.current_streak
        );

        Ok(stats)
    }
}
