//! Compiled defaults shared across the workspace.

/// Letter assigned when a restaurant has no inspections inside the window.
pub const UNKNOWN_GRADE: &str = "Unknown";

/// Default "lowest" letter grade.
pub const DEFAULT_LOWEST_GRADE: &str = "C";

/// Most recent year of the default grading window.
pub const DEFAULT_LATEST_YEAR: i32 = 2025;

/// Accepted range for the most recent window year.
pub const LATEST_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Number of calendar years in the grading window.
pub const WINDOW_YEARS: usize = 5;

/// Tokens searched before a forbidden term for a negation phrase.
pub const NEGATION_LOOKBACK_TOKENS: usize = 3;

/// Characters of context kept on either side of a match.
pub const CONTEXT_RADIUS_CHARS: usize = 40;

/// Default recompute batch size.
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Default forbidden vocabulary: pest evidence.
pub const DEFAULT_FORBIDDEN_TERMS: &[&str] = &[
    "rat",
    "rats",
    "mouse",
    "mice",
    "rodent",
    "rodents",
    "roach",
    "roaches",
    "cockroach",
    "cockroaches",
    "vermin",
];

/// Default negation phrases.
pub const DEFAULT_NEGATION_TERMS: &[&str] = &[
    "no",
    "not",
    "without",
    "free of",
    "absence of",
    "no evidence of",
    "no signs of",
    "not observed",
];
