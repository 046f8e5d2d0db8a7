use std::cmp::Ordering;

use crate::models::{FilterCriteria, Problem, ProblemSort, SortKey, SortOrder};

/// Keeps the problems that pass every present predicate, in input order.
pub fn filter_problems(problems: &[Problem], criteria: &FilterCriteria) -> Vec<Problem> {
    problems
        .iter()
        .filter(|problem| matches_criteria(problem, criteria))
        .cloned()
        .collect()
}

pub fn matches_criteria(problem: &Problem, criteria: &FilterCriteria) -> bool {
    if let Some(allowed) = &criteria.difficulty {
        if !allowed.contains(&problem.difficulty) {
            return false;
        }
    }

    // An empty list means "no filter", not "match nothing".
    if let Some(needles) = active_list(&criteria.categories) {
        if !any_label_contains(&problem.category, needles) {
            return false;
        }
    }

    if let Some(needles) = active_list(&criteria.tags) {
        if !any_label_contains(&problem.tags, needles) {
            return false;
        }
    }

    if let Some(solved) = criteria.solved {
        if problem.solved != solved {
            return false;
        }
    }

    if let Some(search) = criteria.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        let in_optional = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        };
        let found = problem.title.to_lowercase().contains(&needle)
            || in_optional(&problem.description)
            || in_optional(&problem.notes);
        if !found {
            return false;
        }
    }

    if let Some(range) = criteria.date_range {
        // start > end simply admits nothing.
        let reference = problem.reference_date();
        if reference < range.start || reference > range.end {
            return false;
        }
    }

    true
}

/// Stable sort; ties keep their filtered order in both directions.
pub fn sort_problems(problems: &mut [Problem], sort: ProblemSort) {
    problems.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort.key);
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &Problem, b: &Problem, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title)),
        SortKey::Difficulty => a.difficulty.cmp(&b.difficulty),
        SortKey::Date => a.updated_at.cmp(&b.updated_at),
        SortKey::Category => first_label(&a.category).cmp(first_label(&b.category)),
    }
}

fn first_label(labels: &[String]) -> &str {
    labels.first().map(String::as_str).unwrap_or("")
}

fn active_list(list: &Option<Vec<String>>) -> Option<&[String]> {
    list.as_deref().filter(|values| !values.is_empty())
}

fn any_label_contains(labels: &[String], needles: &[String]) -> bool {
    needles.iter().any(|needle| {
        let needle = needle.to_lowercase();
        labels
            .iter()
            .any(|label| label.to_lowercase().contains(&needle))
    })
}
