//! Batch recompute configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BATCH_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RecomputeConfig {
    /// Restaurants graded per batch. Default: 200.
    pub batch_size: Option<usize>,
    /// Worker threads for parallel grading. Default: rayon's global pool.
    pub threads: Option<usize>,
}

impl RecomputeConfig {
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}
