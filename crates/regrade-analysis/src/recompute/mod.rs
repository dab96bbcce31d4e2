//! Batch recompute. Grades a selection of restaurants and hands each
//! persisted record to a `GradeSink`.

pub mod filter;
pub mod runner;
pub mod sink;

pub use filter::RecomputeFilter;
pub use runner::{grade_restaurants, RecomputeSummary, Recomputer};
pub use sink::GradeSink;
