use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::{validate_request, ApiError};
use crate::{
    extractors::AppJson,
    models::{
        CreateProblemRequest, CreateSolutionRequest, ListProblemsQuery, Problem, Solution,
        UpdateProblemRequest,
    },
    services::{problem_service::ProblemService, AppState},
};

pub async fn list_problems(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProblemsQuery>,
) -> Result<Json<Vec<Problem>>, ApiError> {
    let (criteria, sort) = query.into_parts().map_err(|message| {
        tracing::warn!("Rejected problem list query: {}", message);
        ApiError::bad_request(message)
    })?;

    let service = ProblemService::new(&state);
    let problems = service.list_problems(&criteria, sort).await?;
    Ok(Json(problems))
}

pub async fn create_problem(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateProblemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    let service = ProblemService::new(&state);
    let problem = service.create_problem(req).await?;
    Ok((StatusCode::CREATED, Json(problem)))
}

pub async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
) -> Result<Json<Problem>, ApiError> {
    let service = ProblemService::new(&state);
    Ok(Json(service.get_problem(&problem_id).await?))
}

pub async fn update_problem(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
    AppJson(req): AppJson<UpdateProblemRequest>,
) -> Result<Json<Problem>, ApiError> {
    validate_request(&req)?;

    let service = ProblemService::new(&state);
    let problem = service.update_problem(&problem_id, req).await?;
    Ok(Json(problem))
}

pub async fn delete_problem(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = ProblemService::new(&state);
    service.delete_problem(&problem_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_solutions(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
) -> Result<Json<Vec<Solution>>, ApiError> {
    let service = ProblemService::new(&state);
    Ok(Json(service.list_solutions(&problem_id).await?))
}

pub async fn add_solution(
    State(state): State<Arc<AppState>>,
    Path(problem_id): Path<String>,
    AppJson(req): AppJson<CreateSolutionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_request(&req)?;

    let service = ProblemService::new(&state);
    let solution = service.add_solution(&problem_id, req).await?;
    Ok((StatusCode::CREATED, Json(solution)))
}
