use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::metrics::{PROBLEM_OPERATIONS_TOTAL, SOLUTIONS_RECORDED_TOTAL};
use crate::models::{
    CreateProblemRequest, CreateSolutionRequest, FilterCriteria, Problem, ProblemSort, Solution,
    UpdateProblemRequest,
};
use crate::services::{
    filtering::{filter_problems, sort_problems},
    AppState,
};
use crate::store::{RecordStore, StoreError};
use crate::utils::time::Clock;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("Problem not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(StoreError),
}

impl ProblemError {
    fn from_store(err: StoreError, id: &str) -> Self {
        match err {
            StoreError::NotFound => ProblemError::NotFound(id.to_string()),
            other => ProblemError::Store(other),
        }
    }
}

pub struct ProblemService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl ProblemService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            clock: state.clock,
        }
    }

    /// Filters a snapshot of all problems, then sorts if asked to.
    pub async fn list_problems(
        &self,
        criteria: &FilterCriteria,
        sort: Option<ProblemSort>,
    ) -> Result<Vec<Problem>, ProblemError> {
        let problems = self.store.list_problems().await.map_err(ProblemError::Store)?;
        let total = problems.len();

        let mut matched = filter_problems(&problems, criteria);
        if let Some(sort) = sort {
            sort_problems(&mut matched, sort);
        }

        tracing::debug!("Listing problems: {} of {} matched", matched.len(), total);
        Ok(matched)
    }

    pub async fn get_problem(&self, id: &str) -> Result<Problem, ProblemError> {
        self.store
            .get_problem(id)
            .await
            .map_err(|e| ProblemError::from_store(e, id))
    }

    pub async fn create_problem(&self, req: CreateProblemRequest) -> Result<Problem, ProblemError> {
        let problem = Problem::from_request(Uuid::new_v4().to_string(), req, self.clock.now());

        self.store
            .insert_problem(problem.clone())
            .await
            .map_err(ProblemError::Store)?;

        PROBLEM_OPERATIONS_TOTAL.with_label_values(&["created"]).inc();
        tracing::info!("Problem created: {} ({})", problem.id, problem.title);

        Ok(problem)
    }

    pub async fn update_problem(
        &self,
        id: &str,
        req: UpdateProblemRequest,
    ) -> Result<Problem, ProblemError> {
        let now = self.clock.now();
        let updated = self
            .store
            .modify_problem(
                id,
                Box::new(move |problem: &mut Problem| problem.apply_update(req, now)),
            )
            .await
            .map_err(|e| ProblemError::from_store(e, id))?;

        PROBLEM_OPERATIONS_TOTAL.with_label_values(&["updated"]).inc();
        tracing::info!("Problem updated: {}", id);

        Ok(updated)
    }

    /// Removes the problem; its solutions go with it.
    pub async fn delete_problem(&self, id: &str) -> Result<(), ProblemError> {
        self.store
            .delete_problem(id)
            .await
            .map_err(|e| ProblemError::from_store(e, id))?;

        PROBLEM_OPERATIONS_TOTAL.with_label_values(&["deleted"]).inc();
        tracing::info!("Problem deleted: {}", id);

        Ok(())
    }

    pub async fn add_solution(
        &self,
        problem_id: &str,
        req: CreateSolutionRequest,
    ) -> Result<Solution, ProblemError> {
        let now = self.clock.now();
        let solution = Solution::from_request(Uuid::new_v4().to_string(), problem_id, req, now);

        let recorded = solution.clone();
        let problem = self
            .store
            .modify_problem(
                problem_id,
                Box::new(move |problem: &mut Problem| problem.record_solution(recorded, now)),
            )
            .await
            .map_err(|e| ProblemError::from_store(e, problem_id))?;

        SOLUTIONS_RECORDED_TOTAL.inc();
        tracing::info!(
            "Solution {} recorded for problem {} (attempts={})",
            solution.id,
            problem_id,
            problem.attempts
        );

        Ok(solution)
    }

    pub async fn list_solutions(&self, problem_id: &str) -> Result<Vec<Solution>, ProblemError> {
        Ok(self.get_problem(problem_id).await?.solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Difficulty, SortKey, SortOrder};
    use crate::store::InMemoryStore;
    use chrono::{TimeZone, Utc};

    fn service() -> ProblemService {
        let clock = Clock::fixed(Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap());
        let state = AppState::with_store(Config::default(), Arc::new(InMemoryStore::new()), clock);
        ProblemService::new(&state)
    }

    fn create(title: &str, difficulty: Difficulty) -> CreateProblemRequest {
        CreateProblemRequest {
            title: title.to_string(),
            difficulty,
            category: vec!["Arrays".to_string()],
            tags: vec![],
            url: None,
            description: None,
            time_complexity: None,
            space_complexity: None,
            notes: None,
        }
    }

    fn solution_request() -> CreateSolutionRequest {
        CreateSolutionRequest {
            language: "Rust".to_string(),
            code: "fn solve() {}".to_string(),
            approach: "Two pointers".to_string(),
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(1)".to_string(),
            runtime: Some(3.0),
            memory: None,
            beats: Some(91.5),
            explanation: None,
            github_url: None,
        }
    }

    #[tokio::test]
    async fn test_add_solution_keeps_invariants() {
        let service = service();
        let problem = service
            .create_problem(create("Two Sum", Difficulty::Easy))
            .await
            .unwrap();

        service.add_solution(&problem.id, solution_request()).await.unwrap();
        service.add_solution(&problem.id, solution_request()).await.unwrap();

        let stored = service.get_problem(&problem.id).await.unwrap();
        assert!(stored.solved);
        assert_eq!(stored.attempts, 2);
        assert_eq!(stored.solutions.len(), 2);
        assert!(stored.first_solved_at.is_some());
        assert!(stored.solutions.iter().all(|s| s.problem_id == problem.id));
    }

    #[tokio::test]
    async fn test_add_solution_to_missing_problem() {
        let err = service()
            .add_solution("missing", solution_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ProblemError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_update_missing_problem() {
        let err = service()
            .update_problem("missing", UpdateProblemRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProblemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let problem = service
            .create_problem(create("Valid Parentheses", Difficulty::Easy))
            .await
            .unwrap();

        service.delete_problem(&problem.id).await.unwrap();

        assert!(matches!(
            service.get_problem(&problem.id).await,
            Err(ProblemError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_problem(&problem.id).await,
            Err(ProblemError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let service = service();
        service
            .create_problem(create("Merge Intervals", Difficulty::Medium))
            .await
            .unwrap();
        service
            .create_problem(create("Trapping Rain Water", Difficulty::Hard))
            .await
            .unwrap();
        service
            .create_problem(create("Contains Duplicate", Difficulty::Easy))
            .await
            .unwrap();

        let criteria = FilterCriteria {
            difficulty: Some(vec![Difficulty::Easy, Difficulty::Hard]),
            ..Default::default()
        };
        let sort = ProblemSort {
            key: SortKey::Title,
            order: SortOrder::Asc,
        };
        let titles: Vec<String> = service
            .list_problems(&criteria, Some(sort))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["Contains Duplicate", "Trapping Rain Water"]);
    }
}
