use axum::{extract::State, Json};
use std::sync::Arc;

use super::ApiError;
use crate::{
    models::ProgressStats,
    services::{stats_service::StatsService, AppState},
};

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProgressStats>, ApiError> {
    let service = StatsService::new(&state);
    Ok(Json(service.progress().await?))
}
