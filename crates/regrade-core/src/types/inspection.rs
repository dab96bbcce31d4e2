//! Inspection records and the `Inspection` input seam.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{lenient_date, nullable_string};

/// Anything the grading engine can read an inspection from.
///
/// The engine only needs the date and the two narrative columns; storage
/// layers can implement this on their own row types.
pub trait Inspection {
    /// Inspection date. `None` when absent or unparseable.
    fn date(&self) -> Option<NaiveDate>;

    /// Violation narrative. Empty when missing.
    fn summary(&self) -> &str;

    /// Action taken by the agency. Empty when missing.
    fn action(&self) -> &str;

    /// Calendar year of the inspection, if dated.
    fn year(&self) -> Option<i32> {
        self.date().map(|d| d.year())
    }

    /// Summary and action joined by a space, blank parts dropped.
    fn composed_text(&self) -> String {
        let parts = [self.summary(), self.action()];
        parts
            .iter()
            .filter(|p| !p.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

impl<T: Inspection + ?Sized> Inspection for &T {
    fn date(&self) -> Option<NaiveDate> {
        (**self).date()
    }

    fn summary(&self) -> &str {
        (**self).summary()
    }

    fn action(&self) -> &str {
        (**self).action()
    }
}

/// A single agency inspection of a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Agency-assigned letter grade.
    #[serde(default, deserialize_with = "nullable_string")]
    pub grade: String,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub violation_code: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub action: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub critical_flag: String,
}

impl InspectionRecord {
    pub fn new(date: NaiveDate, summary: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            summary: summary.into(),
            ..Default::default()
        }
    }

    /// Shorthand for an inspection on January 1st of `year`.
    pub fn in_year(year: i32, summary: impl Into<String>) -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(year, 1, 1),
            summary: summary.into(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }
}

impl Inspection for InspectionRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn action(&self) -> &str {
        &self.action
    }
}
