use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::transfer::ImportSummary,
    services::{
        transfer_service::{ImportError, TransferService},
        AppState,
    },
};

/// Full snapshot served as a downloadable JSON file.
pub async fn export_data(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let service = TransferService::new(&state);
    let document = service.export().await?;

    let filename = format!(
        "practice-export-{}.json",
        document.export_date.format("%Y-%m-%d")
    );

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )],
        Json(document),
    )
        .into_response())
}

pub async fn import_data(
    State(state): State<Arc<AppState>>,
    AppJson(document): AppJson<Value>,
) -> Result<Json<ImportSummary>, Response> {
    let service = TransferService::new(&state);
    service
        .import(&document)
        .await
        .map(Json)
        .map_err(import_rejection)
}

fn import_rejection(err: ImportError) -> Response {
    let message = err.to_string();
    match err {
        ImportError::InvalidProblems { valid, total }
        | ImportError::InvalidSessions { valid, total } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": message,
                "valid": valid,
                "total": total
            })),
        )
            .into_response(),
        ImportError::MissingProblems | ImportError::DuplicateProblemId(_) => {
            ApiError::BadRequest(message).into_response()
        }
        ImportError::Store(e) => ApiError::from(e).into_response(),
    }
}
