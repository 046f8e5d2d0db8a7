use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::metrics;
use crate::services::{problem_service::ProblemError, session_service::SessionError, AppState};
use crate::store::{RecordStore, StoreError};

pub mod leetcode;
pub mod problems;
pub mod sessions;
pub mod stats;
pub mod transfer;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = record_counts(state.store.as_ref()).await;

    match counts {
        Ok((problems, sessions)) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "practice-tracker-api",
                "version": env!("CARGO_PKG_VERSION"),
                "records": {
                    "problems": problems,
                    "sessions": sessions
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed to read store: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "service": "practice-tracker-api",
                    "version": env!("CARGO_PKG_VERSION"),
                    "error": e.to_string()
                })),
            )
        }
    }
}

async fn record_counts(store: &dyn RecordStore) -> Result<(usize, usize), StoreError> {
    let problems = store.list_problems().await?.len();
    let sessions = store.list_sessions().await?.len();
    Ok((problems, sessions))
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// Runs the derive-generated checks, turning failures into a 400.
pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        tracing::warn!("Rejected request payload: {}", e);
        ApiError::from(e)
    })
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Validation failed: {}", err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Record not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ProblemError> for ApiError {
    fn from(err: ProblemError) -> Self {
        match err {
            ProblemError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProblemError::Store(e) => e.into(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(message)).into_response()
    }
}
