//! Persistence seam for recomputed grades.

use std::collections::BTreeMap;

use regrade_core::errors::RecomputeError;
use regrade_core::types::Restaurant;

use crate::grading::GradeRecord;

/// Receives each recomputed grade. Implemented by the storage layer.
pub trait GradeSink {
    fn persist(&mut self, restaurant: &Restaurant, record: &GradeRecord) -> Result<(), RecomputeError>;
}

/// In-memory sink keyed by restaurant id; later writes replace earlier ones.
impl GradeSink for BTreeMap<u64, GradeRecord> {
    fn persist(&mut self, restaurant: &Restaurant, record: &GradeRecord) -> Result<(), RecomputeError> {
        self.insert(restaurant.id, record.clone());
        Ok(())
    }
}
