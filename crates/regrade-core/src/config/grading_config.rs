//! Grading engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FORBIDDEN_TERMS, DEFAULT_LATEST_YEAR, DEFAULT_LOWEST_GRADE, DEFAULT_NEGATION_TERMS,
};

/// Configuration for the grading engine.
///
/// `None` means "use the compiled default". An explicitly empty
/// `forbidden_terms` list is rejected at validation; an explicitly empty
/// `negation_terms` list disables negation suppression.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GradingConfig {
    /// Terms whose unnegated presence flags an inspection year.
    pub forbidden_terms: Option<Vec<String>>,
    /// Phrases that suppress a directly following forbidden term.
    pub negation_terms: Option<Vec<String>>,
    /// Letter assigned by the "lowest" rules. Default: "C".
    pub lowest_grade: Option<String>,
    /// Most recent year of the five-year window. Default: 2025.
    pub latest_year: Option<i32>,
}

impl GradingConfig {
    pub fn effective_forbidden_terms(&self) -> Vec<String> {
        match &self.forbidden_terms {
            Some(terms) => terms.clone(),
            None => DEFAULT_FORBIDDEN_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn effective_negation_terms(&self) -> Vec<String> {
        match &self.negation_terms {
            Some(terms) => terms.clone(),
            None => DEFAULT_NEGATION_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn effective_lowest_grade(&self) -> String {
        self.lowest_grade
            .clone()
            .unwrap_or_else(|| DEFAULT_LOWEST_GRADE.to_string())
    }

    pub fn effective_latest_year(&self) -> i32 {
        self.latest_year.unwrap_or(DEFAULT_LATEST_YEAR)
    }
}
