//! Restaurant selection for a recompute run.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use regrade_core::errors::RecomputeError;
use regrade_core::types::Restaurant;

/// Which restaurants to recompute. Empty lists and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeFilter {
    pub camis: Vec<String>,
    pub ids: Vec<u64>,
    /// Only restaurants with an inspection on or after this date.
    pub since: Option<NaiveDate>,
}

impl RecomputeFilter {
    /// Parse a `YYYY-MM-DD` since-date.
    pub fn parse_since(raw: &str) -> Result<NaiveDate, RecomputeError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
            RecomputeError::InvalidSince {
                value: raw.to_string(),
                message: e.to_string(),
            }
        })
    }

    pub fn with_camis<I, S>(mut self, camis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.camis.extend(camis.into_iter().map(Into::into));
        self
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.ids.extend(ids);
        self
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if !self.camis.is_empty() && !self.camis.iter().any(|c| *c == restaurant.camis) {
            return false;
        }
        if !self.ids.is_empty() && !self.ids.contains(&restaurant.id) {
            return false;
        }
        if let Some(since) = self.since {
            if !restaurant.inspected_since(since) {
                return false;
            }
        }
        true
    }

    /// Matching restaurants, one per id (first occurrence wins), ordered by id.
    pub fn select<'r>(&self, restaurants: &'r [Restaurant]) -> Vec<&'r Restaurant> {
        let mut by_id: BTreeMap<u64, &'r Restaurant> = BTreeMap::new();
        for restaurant in restaurants.iter().filter(|r| self.matches(r)) {
            by_id.entry(restaurant.id).or_insert(restaurant);
        }
        by_id.into_values().collect()
    }
}
