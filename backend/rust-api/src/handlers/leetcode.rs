use axum::Json;

use super::{validate_request, ApiError};
use crate::{
    extractors::AppJson,
    models::leetcode::{
        AnalyzeProblemRequest, AnalyzeProfileRequest, ProblemAnalysis, ProfileSummary,
    },
    services::leetcode,
};

/// Inspects a pasted LeetCode URL and page text. No network access.
pub async fn analyze_problem(
    AppJson(req): AppJson<AnalyzeProblemRequest>,
) -> Result<Json<ProblemAnalysis>, ApiError> {
    validate_request(&req)?;

    let analysis = leetcode::analyze(&req.url, req.content.as_deref());
    tracing::debug!(
        "Analyzed {}: valid={}, {} tags",
        analysis.url,
        analysis.valid_url,
        analysis.tags.len()
    );
    Ok(Json(analysis))
}

pub async fn analyze_profile(
    AppJson(req): AppJson<AnalyzeProfileRequest>,
) -> Result<Json<ProfileSummary>, ApiError> {
    validate_request(&req)?;

    let profile = leetcode::parse_profile(&req.username, &req.content);
    tracing::debug!(
        "Parsed profile {}: {} of {} solved",
        profile.username,
        profile.solved_problems,
        profile.total_problems
    );
    Ok(Json(profile))
}
