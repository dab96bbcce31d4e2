//! The five-year grading window and its per-year tri-state aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regrade_core::constants::{DEFAULT_LATEST_YEAR, LATEST_YEAR_RANGE, WINDOW_YEARS};
use regrade_core::errors::GradingError;

/// Five consecutive calendar years, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearWindow {
    years: [i32; WINDOW_YEARS],
}

impl YearWindow {
    /// The five years ending with `latest` (inclusive).
    ///
    /// `latest` must lie in `LATEST_YEAR_RANGE`.
    pub fn ending(latest: i32) -> Result<Self, GradingError> {
        if !LATEST_YEAR_RANGE.contains(&latest) {
            return Err(GradingError::LatestYearOutOfRange {
                year: latest,
                min: *LATEST_YEAR_RANGE.start(),
                max: *LATEST_YEAR_RANGE.end(),
            });
        }
        Ok(Self::span(latest))
    }

    fn span(latest: i32) -> Self {
        let mut years = [0; WINDOW_YEARS];
        for (slot, year) in years.iter_mut().enumerate() {
            *year = latest - (WINDOW_YEARS - 1 - slot) as i32;
        }
        Self { years }
    }

    pub fn years(&self) -> &[i32; WINDOW_YEARS] {
        &self.years
    }

    pub fn oldest(&self) -> i32 {
        self.years[0]
    }

    pub fn latest(&self) -> i32 {
        self.years[WINDOW_YEARS - 1]
    }

    pub fn contains(&self, year: i32) -> bool {
        self.slot_of(year).is_some()
    }

    /// Position of `year` in the window (0 = oldest).
    pub fn slot_of(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|&y| y == year)
    }
}

impl Default for YearWindow {
    fn default() -> Self {
        Self::span(DEFAULT_LATEST_YEAR)
    }
}

/// Classification of one window year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearStatus {
    /// No in-window inspection that year.
    #[default]
    NoData,
    /// Inspected, and no inspection had an unnegated forbidden term.
    Clean,
    /// At least one inspection had an unnegated forbidden term.
    Forbidden,
}

impl YearStatus {
    pub fn has_data(self) -> bool {
        !matches!(self, Self::NoData)
    }

    pub fn is_forbidden(self) -> bool {
        matches!(self, Self::Forbidden)
    }

    pub fn is_clean(self) -> bool {
        matches!(self, Self::Clean)
    }

    /// `None` for no data, otherwise whether the year is forbidden.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::NoData => None,
            Self::Clean => Some(false),
            Self::Forbidden => Some(true),
        }
    }

    /// Fold one more inspection into this year. Forbidden is sticky.
    fn observe(self, forbidden: bool) -> Self {
        match (self, forbidden) {
            (Self::Forbidden, _) | (_, true) => Self::Forbidden,
            _ => Self::Clean,
        }
    }
}

/// Per-year statuses for one restaurant over a `YearWindow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearAggregate {
    window: YearWindow,
    statuses: [YearStatus; WINDOW_YEARS],
}

impl YearAggregate {
    pub fn new(window: YearWindow) -> Self {
        Self {
            window,
            statuses: [YearStatus::NoData; WINDOW_YEARS],
        }
    }

    /// Record one inspection. Returns `false` (and changes nothing) when the
    /// year is outside the window.
    pub fn record(&mut self, year: i32, forbidden: bool) -> bool {
        match self.window.slot_of(year) {
            Some(slot) => {
                self.statuses[slot] = self.statuses[slot].observe(forbidden);
                true
            }
            None => false,
        }
    }

    pub fn window(&self) -> &YearWindow {
        &self.window
    }

    /// Statuses oldest first.
    pub fn statuses(&self) -> [YearStatus; WINDOW_YEARS] {
        self.statuses
    }

    pub fn status_of(&self, year: i32) -> Option<YearStatus> {
        self.window.slot_of(year).map(|slot| self.statuses[slot])
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.iter().all(|s| !s.has_data())
    }

    pub fn any_forbidden(&self) -> bool {
        self.statuses.iter().any(|s| s.is_forbidden())
    }

    /// True when every year from `slot` through the latest has data and is clean.
    pub fn clean_since(&self, slot: usize) -> bool {
        self.statuses
            .get(slot..)
            .is_some_and(|tail| !tail.is_empty() && tail.iter().all(|s| s.is_clean()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, YearStatus)> + '_ {
        self.window.years().iter().copied().zip(self.statuses.iter().copied())
    }

    /// Year label → forbidden flag. No-data years map to `None` when
    /// `include_no_data` is set and are omitted otherwise.
    pub fn forbidden_years(&self, include_no_data: bool) -> BTreeMap<String, Option<bool>> {
        self.iter()
            .filter(|(_, status)| include_no_data || status.has_data())
            .map(|(year, status)| (year.to_string(), status.as_flag()))
            .collect()
    }
}
