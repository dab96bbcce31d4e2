//! Scans inspection text, aggregates years and applies the rule tables.

pub mod engine;
pub mod negation;
pub mod rules;
pub mod scanner;
pub mod types;
pub mod window;

pub use engine::GradingEngine;
pub use negation::NegationMatcher;
pub use rules::{LetterRule, StarRule};
pub use scanner::{ScanOutcome, TextScanner};
pub use types::{Explanation, ForbiddenHit, GradeRecord, GradeResult, NegatedHit};
pub use window::{YearAggregate, YearStatus, YearWindow};
