use std::sync::Arc;

use crate::config::Config;
use crate::store::{InMemoryStore, RecordStore};
use crate::utils::time::Clock;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub clock: Clock,
}

impl AppState {
    /// State backed by a fresh in-memory store and the system clock.
    pub fn new(config: Config) -> Self {
        tracing::info!("Initializing in-memory record store");
        Self::with_store(config, Arc::new(InMemoryStore::new()), Clock::System)
    }

    pub fn with_store(config: Config, store: Arc<dyn RecordStore>, clock: Clock) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }
}

pub mod filtering;
pub mod leetcode;
pub mod problem_service;
pub mod session_service;
pub mod statistics;
pub mod stats_service;
pub mod transfer_service;
