use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A dated block of practice. Problem ids are plain references; nothing
/// checks that they still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub problems_solved: Vec<String>,
    /// Minutes.
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Defaults to the current time when omitted.
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub problems_solved: Vec<String>,

    #[validate(range(max = 1440, message = "Time spent cannot exceed one day"))]
    pub time_spent: u32,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl StudySession {
    pub fn from_request(id: String, req: CreateSessionRequest, now: DateTime<Utc>) -> Self {
        StudySession {
            id,
            date: req.date.unwrap_or(now),
            problems_solved: req.problems_solved,
            time_spent: req.time_spent,
            notes: req
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
}
