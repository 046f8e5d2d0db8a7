use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    problem::{Difficulty, Problem, Solution},
    session::StudySession,
};

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub problems: Vec<Problem>,
    pub sessions: Vec<StudySession>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// Import-side shape of a problem: only id, title, difficulty and category
/// are required. Everything else may be missing or `null` and falls back to
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: Vec<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_complexity: Option<String>,
    #[serde(default)]
    pub space_complexity: Option<String>,
    #[serde(default)]
    pub solutions: Option<Vec<SolutionRecord>>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub solved: Option<bool>,
    #[serde(default)]
    pub first_solved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_solved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Import-side shape of a solution. `problemId` defaults to the owning
/// problem and `createdAt` to the problem's creation time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRecord {
    pub id: String,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub problem_id: Option<String>,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub beats: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub approach: Option<String>,
    #[serde(default)]
    pub time_complexity: Option<String>,
    #[serde(default)]
    pub space_complexity: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SolutionRecord {
    fn into_solution(self, problem_id: &str, fallback_created_at: DateTime<Utc>) -> Solution {
        Solution {
            id: self.id,
            problem_id: self.problem_id.unwrap_or_else(|| problem_id.to_string()),
            language: self.language,
            code: self.code,
            runtime: self.runtime,
            memory: self.memory,
            beats: self.beats,
            explanation: self.explanation,
            approach: self.approach.unwrap_or_default(),
            time_complexity: self.time_complexity.unwrap_or_default(),
            space_complexity: self.space_complexity.unwrap_or_default(),
            github_url: self.github_url,
            created_at: self.created_at.unwrap_or(fallback_created_at),
        }
    }
}

impl ProblemRecord {
    pub fn is_structurally_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.title.trim().is_empty()
    }

    pub fn into_problem(self, now: DateTime<Utc>) -> Problem {
        let created_at = self.created_at.unwrap_or(now);
        let solutions: Vec<Solution> = self
            .solutions
            .unwrap_or_default()
            .into_iter()
            .map(|record| record.into_solution(&self.id, created_at))
            .collect();

        Problem {
            id: self.id,
            title: self.title,
            difficulty: self.difficulty,
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            url: self.url,
            description: self.description,
            time_complexity: self.time_complexity,
            space_complexity: self.space_complexity,
            solutions,
            attempts: self.attempts.unwrap_or_default(),
            solved: self.solved.unwrap_or_default(),
            first_solved_at: self.first_solved_at,
            last_solved_at: self.last_solved_at,
            notes: self.notes,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub problems: usize,
    pub sessions: usize,
}
