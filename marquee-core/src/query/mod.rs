pub mod filtering;
pub mod planner;
pub mod scoring;
pub mod sorting;
pub mod types;

pub use filtering::{MoviePredicate, SearchKey};
pub use planner::{QueryPlanner, plan, plan_at};
pub use scoring::{RelevanceScorer, fallback_score, score};
pub use sorting::*;
pub use types::*;
