use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::models::{
    stats::WEEK_DAYS, Difficulty, Problem, ProgressStats, StudySession,
};
use crate::utils::time::whole_days_between;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Derives every progress figure from scratch. Pure: same inputs and `now`
/// always give the same result.
pub fn compute_stats(
    problems: &[Problem],
    sessions: &[StudySession],
    now: DateTime<Utc>,
) -> ProgressStats {
    let count_difficulty =
        |difficulty: Difficulty| problems.iter().filter(|p| p.difficulty == difficulty).count();

    let mut newest_first: Vec<&StudySession> = sessions.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));

    ProgressStats {
        total_problems: problems.len(),
        solved_problems: problems.iter().filter(|p| p.solved).count(),
        easy_problems: count_difficulty(Difficulty::Easy),
        medium_problems: count_difficulty(Difficulty::Medium),
        hard_problems: count_difficulty(Difficulty::Hard),
        current_streak: current_streak(&newest_first, now),
        longest_streak: longest_streak(&newest_first),
        weekly_progress: weekly_progress(sessions, now),
        category_progress: category_progress(problems),
        average_time: average_time(sessions),
        recent_activity: newest_first
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|s| (*s).clone())
            .collect(),
    }
}

/// Walks back from `now` while each session is at most one day before the
/// previous one. Every session counts, so two on the same day add two.
fn current_streak(newest_first: &[&StudySession], now: DateTime<Utc>) -> u32 {
    let mut streak = 0;
    let mut reference = now;

    for session in newest_first {
        if whole_days_between(session.date, reference) > 1 {
            break;
        }
        streak += 1;
        reference = session.date;
    }

    streak
}

/// Longest run where each next session is exactly one day older. Tries
/// every start index, which is quadratic but fine for personal volumes.
fn longest_streak(newest_first: &[&StudySession]) -> u32 {
    let mut longest = 0;

    for (start, session) in newest_first.iter().enumerate() {
        let mut run = 1;
        let mut run_date = session.date;

        for next in &newest_first[start + 1..] {
            if whole_days_between(next.date, run_date) != 1 {
                break;
            }
            run += 1;
            run_date = next.date;
        }

        longest = longest.max(run);
    }

    longest
}

/// Problems solved per day over the last week, oldest bucket first.
///
/// A session exactly seven days old passes the window check but has no
/// bucket and is dropped. Future-dated sessions are ignored.
fn weekly_progress(sessions: &[StudySession], now: DateTime<Utc>) -> [u32; WEEK_DAYS] {
    let mut buckets = [0u32; WEEK_DAYS];
    let window_start = now - Duration::days(WEEK_DAYS as i64);

    for session in sessions.iter().filter(|s| s.date >= window_start) {
        let day_index = whole_days_between(session.date, now);
        if (0..WEEK_DAYS as i64).contains(&day_index) {
            buckets[WEEK_DAYS - 1 - day_index as usize] += session.problems_solved.len() as u32;
        }
    }

    buckets
}

fn category_progress(problems: &[Problem]) -> BTreeMap<String, u32> {
    let mut progress = BTreeMap::new();
    for problem in problems {
        for category in &problem.category {
            *progress.entry(category.clone()).or_insert(0) += u32::from(problem.solved);
        }
    }
    progress
}

fn average_time(sessions: &[StudySession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total: u64 = sessions.iter().map(|s| u64::from(s.time_spent)).sum();
    total as f64 / sessions.len() as f64
}
