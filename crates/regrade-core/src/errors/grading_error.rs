//! Grading engine construction errors.
//!
//! Evaluation itself is total; these only surface while building an engine.

use super::error_code::{self, RegradeErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error("Forbidden term list cannot be empty")]
    EmptyForbiddenTerms,

    #[error("Blank {kind} term at position {index}")]
    BlankTerm { kind: &'static str, index: usize },

    #[error("Latest window year {year} is outside {min}..={max}")]
    LatestYearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Failed to compile pattern for term '{term}': {message}")]
    PatternCompilation { term: String, message: String },
}

impl RegradeErrorCode for GradingError {
    fn error_code(&self) -> &'static str {
        error_code::GRADING_ERROR
    }
}
