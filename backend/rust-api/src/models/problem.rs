use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// A tracked coding exercise together with every solution recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_complexity: Option<String>,
    #[serde(default)]
    pub solutions: Vec<Solution>,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub solved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_solved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_solved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Builds a fresh, unsolved problem from a create request.
    pub fn from_request(id: String, req: CreateProblemRequest, now: DateTime<Utc>) -> Self {
        Problem {
            id,
            title: req.title.trim().to_string(),
            difficulty: req.difficulty,
            category: normalize_labels(req.category),
            tags: normalize_labels(req.tags),
            url: non_empty(req.url),
            description: non_empty(req.description),
            time_complexity: non_empty(req.time_complexity),
            space_complexity: non_empty(req.space_complexity),
            solutions: Vec::new(),
            attempts: 0,
            solved: false,
            first_solved_at: None,
            last_solved_at: None,
            notes: non_empty(req.notes),
            created_at: now,
            updated_at: now,
        }
    }

    /// Date used by date-range filtering: last solve if any, creation otherwise.
    pub fn reference_date(&self) -> DateTime<Utc> {
        self.last_solved_at.unwrap_or(self.created_at)
    }

    /// Appends a solution and advances the solve bookkeeping.
    ///
    /// `first_solved_at` is only ever written once.
    pub fn record_solution(&mut self, solution: Solution, now: DateTime<Utc>) {
        self.solutions.push(solution);
        self.solved = true;
        self.attempts += 1;
        if self.first_solved_at.is_none() {
            self.first_solved_at = Some(now);
        }
        self.last_solved_at = Some(now);
        self.updated_at = now;
    }

    /// Applies the editable metadata fields of a partial update.
    pub fn apply_update(&mut self, req: UpdateProblemRequest, now: DateTime<Utc>) {
        if let Some(title) = req.title {
            self.title = title.trim().to_string();
        }
        if let Some(difficulty) = req.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(category) = req.category {
            self.category = normalize_labels(category);
        }
        if let Some(tags) = req.tags {
            self.tags = normalize_labels(tags);
        }
        if let Some(url) = req.url {
            self.url = non_empty(Some(url));
        }
        if let Some(description) = req.description {
            self.description = non_empty(Some(description));
        }
        if let Some(notes) = req.notes {
            self.notes = non_empty(Some(notes));
        }
        if let Some(time_complexity) = req.time_complexity {
            self.time_complexity = non_empty(Some(time_complexity));
        }
        if let Some(space_complexity) = req.space_complexity {
            self.space_complexity = non_empty(Some(space_complexity));
        }
        self.updated_at = now;
    }
}

/// One recorded implementation of a problem. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub id: String,
    pub problem_id: String,
    pub language: String,
    pub code: String,
    /// Runtime in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,
    /// Memory in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    /// Percentile of submissions beaten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beats: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub time_complexity: String,
    #[serde(default)]
    pub space_complexity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Solution {
    pub fn from_request(
        id: String,
        problem_id: &str,
        req: CreateSolutionRequest,
        now: DateTime<Utc>,
    ) -> Self {
        Solution {
            id,
            problem_id: problem_id.to_string(),
            language: req.language.trim().to_string(),
            code: req.code,
            runtime: req.runtime,
            memory: req.memory,
            beats: req.beats,
            explanation: non_empty(req.explanation),
            approach: req.approach.trim().to_string(),
            time_complexity: req.time_complexity.trim().to_string(),
            space_complexity: req.space_complexity.trim().to_string(),
            github_url: non_empty(req.github_url),
            created_at: now,
        }
    }
}

/// Body of a create-problem request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub category: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(url(message = "URL must be a valid absolute URL"))]
    pub url: Option<String>,

    pub description: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. Solve bookkeeping is absent here: it only changes
/// through recording a solution.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProblemRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,

    pub difficulty: Option<Difficulty>,
    pub category: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSolutionRequest {
    #[validate(length(min = 1, max = 50, message = "Language must be between 1 and 50 characters"))]
    pub language: String,

    #[validate(length(min = 1, message = "Code must not be empty"))]
    pub code: String,

    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub time_complexity: String,
    #[serde(default)]
    pub space_complexity: String,

    #[validate(range(min = 0.0, message = "Runtime must be non-negative"))]
    pub runtime: Option<f64>,

    #[validate(range(min = 0.0, message = "Memory must be non-negative"))]
    pub memory: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "Beats must be a percentile"))]
    pub beats: Option<f64>,

    pub explanation: Option<String>,

    #[validate(url(message = "GitHub URL must be a valid absolute URL"))]
    pub github_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims labels, drops blanks and duplicates while keeping first-seen order.
fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !out.iter().any(|existing| existing == label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn create_request() -> CreateProblemRequest {
        CreateProblemRequest {
            title: "  Two Sum ".to_string(),
            difficulty: Difficulty::Easy,
            category: vec!["Arrays".into(), " ".into(), "Arrays".into(), "Hashing".into()],
            tags: vec![],
            url: Some("https://leetcode.com/problems/two-sum/".into()),
            description: Some("".into()),
            time_complexity: None,
            space_complexity: None,
            notes: None,
        }
    }

    fn solution(id: &str, at: DateTime<Utc>) -> Solution {
        Solution {
            id: id.to_string(),
            problem_id: "p1".to_string(),
            language: "Rust".to_string(),
            code: "fn main() {}".to_string(),
            runtime: None,
            memory: None,
            beats: None,
            explanation: None,
            approach: "Hash map".to_string(),
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(n)".to_string(),
            github_url: None,
            created_at: at,
        }
    }

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_from_request_defaults_lifecycle_fields() {
        let problem = Problem::from_request("p1".into(), create_request(), now());

        assert_eq!(problem.title, "Two Sum");
        assert_eq!(problem.category, vec!["Arrays", "Hashing"]);
        assert_eq!(problem.description, None);
        assert_eq!(problem.attempts, 0);
        assert!(!problem.solved);
        assert!(problem.solutions.is_empty());
        assert_eq!(problem.created_at, problem.updated_at);
        assert_eq!(problem.reference_date(), now());
    }

    #[test]
    fn test_record_solution_sets_first_solved_once() {
        let mut problem = Problem::from_request("p1".into(), create_request(), now());
        let later = now() + Duration::days(2);

        problem.record_solution(solution("s1", now()), now());
        problem.record_solution(solution("s2", later), later);

        assert!(problem.solved);
        assert_eq!(problem.attempts, 2);
        assert_eq!(problem.attempts as usize, problem.solutions.len());
        assert_eq!(problem.first_solved_at, Some(now()));
        assert_eq!(problem.last_solved_at, Some(later));
        assert_eq!(problem.updated_at, later);
        assert_eq!(problem.reference_date(), later);
    }

    #[test]
    fn test_apply_update_touches_only_given_fields() {
        let mut problem = Problem::from_request("p1".into(), create_request(), now());
        let later = now() + Duration::hours(3);

        problem.apply_update(
            UpdateProblemRequest {
                difficulty: Some(Difficulty::Medium),
                notes: Some("revisit".into()),
                url: Some("  ".into()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(problem.title, "Two Sum");
        assert_eq!(problem.difficulty, Difficulty::Medium);
        assert_eq!(problem.notes.as_deref(), Some("revisit"));
        assert_eq!(problem.url, None);
        assert_eq!(problem.updated_at, later);
        assert!(!problem.solved);
    }

    #[test]
    fn test_problem_serializes_camel_case_and_skips_absent_options() {
        let problem = Problem::from_request("p1".into(), create_request(), now());
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["difficulty"], "Easy");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("firstSolvedAt").is_none());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_create_request_validation() {
        let mut req = create_request();
        assert!(req.validate().is_ok());

        req.title = String::new();
        assert!(req.validate().is_err());

        let mut req = create_request();
        req.url = Some("not a url".into());
        assert!(req.validate().is_err());
    }
}
