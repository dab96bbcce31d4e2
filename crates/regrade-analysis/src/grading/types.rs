//! Grading output types: hits, explanation trail, result, persisted record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rules::{LetterRule, StarRule};
use super::window::YearAggregate;

/// An unnegated forbidden-term occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenHit {
    pub year: i32,
    /// Matched text in its original casing.
    pub term: String,
    pub context: String,
}

/// A forbidden-term occurrence suppressed by a preceding negation phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegatedHit {
    pub year: i32,
    pub term: String,
    pub negation: String,
    pub context: String,
}

/// Audit trail attached to every grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Letter rule tag, then star rule tag.
    pub rules_applied: Vec<String>,
    pub forbidden_hits: Vec<ForbiddenHit>,
    pub negations: Vec<NegatedHit>,
    pub forbidden_years: BTreeMap<String, Option<bool>>,
}

/// Outcome of grading one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeResult {
    pub letter: String,
    /// 1..=4
    pub stars: u8,
    pub letter_rule: LetterRule,
    pub star_rule: StarRule,
    pub years: YearAggregate,
    pub forbidden_hits: Vec<ForbiddenHit>,
    pub negations: Vec<NegatedHit>,
}

impl GradeResult {
    /// `[letter_rule, star_rule]` tags.
    pub fn rules_applied(&self) -> [&'static str; 2] {
        [self.letter_rule.tag(), self.star_rule.tag()]
    }

    pub fn applied(&self, tag: &str) -> bool {
        self.rules_applied().contains(&tag)
    }

    /// Per-year flags: `Some(true)` forbidden, `Some(false)` clean,
    /// `None` (or absent) for years without data.
    pub fn forbidden_years(&self, include_no_data: bool) -> BTreeMap<String, Option<bool>> {
        self.years.forbidden_years(include_no_data)
    }

    pub fn explanation(&self) -> Explanation {
        Explanation {
            rules_applied: self.rules_applied().iter().map(|t| t.to_string()).collect(),
            forbidden_hits: self.forbidden_hits.clone(),
            negations: self.negations.clone(),
            forbidden_years: self.forbidden_years(true),
        }
    }

    /// The projection handed to the persistence collaborator.
    pub fn to_record(&self) -> GradeRecord {
        GradeRecord {
            regraded_letter: self.letter.clone(),
            star_rating: self.stars,
            forbidden_years: self.forbidden_years(true),
            grading_explanations: self.explanation(),
        }
    }
}

/// Persisted form of a `GradeResult`; field names match the restaurant
/// columns the storage layer updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub regraded_letter: String,
    pub star_rating: u8,
    pub forbidden_years: BTreeMap<String, Option<bool>>,
    pub grading_explanations: Explanation,
}

impl GradeRecord {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
