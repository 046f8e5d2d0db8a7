use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::problem::Difficulty;

/// Conjunction of optional predicates over problems. `None` disables a
/// predicate; empty `categories`/`tags` lists and an empty `search` do too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub difficulty: Option<Vec<Difficulty>>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub solved: Option<bool>,
    pub search: Option<String>,
    pub date_range: Option<DateRange>,
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Difficulty,
    /// Last update time.
    Date,
    /// First category label.
    Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSort {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Query string of the problem list endpoint.
///
/// List values are comma separated: `?difficulty=Easy,Hard&tags=dp,graph`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProblemsQuery {
    pub difficulty: Option<String>,
    pub categories: Option<String>,
    pub tags: Option<String>,
    pub solved: Option<bool>,
    pub search: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
}

impl ListProblemsQuery {
    /// Splits the flat query into filter criteria and an optional sort.
    ///
    /// Fails on unknown difficulty names and on a half-open date range.
    pub fn into_parts(self) -> Result<(FilterCriteria, Option<ProblemSort>), String> {
        let difficulty = match self.difficulty {
            Some(raw) => Some(
                split_list(&raw)
                    .iter()
                    .map(|value| value.parse::<Difficulty>())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let date_range = match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            (None, None) => None,
            _ => return Err("Both start and end are required for a date range".to_string()),
        };

        let sort = match (self.sort, self.order) {
            (Some(key), order) => Some(ProblemSort {
                key,
                order: order.unwrap_or_default(),
            }),
            (None, Some(_)) => return Err("order requires sort".to_string()),
            (None, None) => None,
        };

        let criteria = FilterCriteria {
            difficulty,
            categories: self.categories.as_deref().map(split_list),
            tags: self.tags.as_deref().map(split_list),
            solved: self.solved,
            search: self.search,
            date_range,
        };

        Ok((criteria, sort))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
