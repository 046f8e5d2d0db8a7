pub mod filter;
pub mod leetcode;
pub mod problem;
pub mod session;
pub mod stats;
pub mod transfer;

pub use filter::{DateRange, FilterCriteria, ListProblemsQuery, ProblemSort, SortKey, SortOrder};
pub use problem::{
    CreateProblemRequest, CreateSolutionRequest, Difficulty, Problem, Solution,
    UpdateProblemRequest,
};
pub use session::{CreateSessionRequest, StudySession};
pub use stats::ProgressStats;
