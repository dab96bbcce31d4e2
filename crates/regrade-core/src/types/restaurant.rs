//! Restaurants and their inspection history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::inspection::{Inspection, InspectionRecord};
use super::serde_helpers::nullable_string;

/// A restaurant as supplied by the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u64,
    /// Agency-unique identifier. May be empty for legacy rows.
    #[serde(default, deserialize_with = "nullable_string")]
    pub camis: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub zipcode: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub borough: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub cuisine_description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default)]
    pub inspections: Vec<InspectionRecord>,
}

impl Restaurant {
    pub fn new(id: u64, camis: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            camis: camis.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_inspection(mut self, inspection: InspectionRecord) -> Self {
        self.inspections.push(inspection);
        self
    }

    /// True if any dated inspection falls on or after `since`.
    pub fn inspected_since(&self, since: NaiveDate) -> bool {
        self.inspections
            .iter()
            .filter_map(|i| i.date())
            .any(|d| d >= since)
    }
}
