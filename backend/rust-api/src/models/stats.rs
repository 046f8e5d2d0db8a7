use serde::Serialize;
use std::collections::BTreeMap;

use super::session::StudySession;

pub const WEEK_DAYS: usize = 7;

/// Aggregates over the whole record set, rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_problems: usize,
    pub solved_problems: usize,
    pub easy_problems: usize,
    pub medium_problems: usize,
    pub hard_problems: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Index 0 is six days ago, index 6 is today.
    pub weekly_progress: [u32; WEEK_DAYS],
    /// Solved problems per category. Categories seen only on unsolved
    /// problems are present with 0.
    pub category_progress: BTreeMap<String, u32>,
    /// Mean session length in minutes.
    pub average_time: f64,
    pub recent_activity: Vec<StudySession>,
}
