//! # regrade-analysis
//!
//! The grading engine. Scans inspection narratives for forbidden terms,
//! folds the hits into a five-year aggregate, and applies the letter and
//! star rule tables. The `recompute` module drives the engine over batches
//! of restaurants.

pub mod grading;
pub mod recompute;

pub use grading::{GradeRecord, GradeResult, GradingEngine, YearStatus, YearWindow};
pub use recompute::{GradeSink, RecomputeFilter, RecomputeSummary, Recomputer};
