use serde::{Deserialize, Serialize};
use validator::Validate;

use super::problem::Difficulty;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeProblemRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    /// Page text pasted by the caller; details are only extracted when present.
    pub content: Option<String>,
}

/// Everything needed to pre-fill a new problem from a LeetCode page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemAnalysis {
    pub url: String,
    pub valid_url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Medium when the page does not say.
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"))]
    pub username: String,

    /// Profile page text pasted by the caller.
    #[serde(default)]
    pub content: String,
}

/// Counters read off a profile page; missing figures are 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub username: String,
    pub profile_url: String,
    pub solved_problems: u32,
    pub total_problems: u32,
    pub ranking: u64,
}
