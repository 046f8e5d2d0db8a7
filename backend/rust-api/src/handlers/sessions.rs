use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{validate_request, ApiError};
use crate::{
    extractors::AppJson,
    models::{CreateSessionRequest, StudySession},
    services::{session_service::SessionService, AppState},
};

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudySession>>, ApiError> {
    let service = SessionService::new(&state);
    Ok(Json(service.list_sessions().await?))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    let service = SessionService::new(&state);
    let session = service.create_session(req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = SessionService::new(&state);
    service.delete_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
