//! Batch recompute errors.

use super::error_code::{self, RegradeErrorCode};

/// Errors that can occur while recomputing grades for a batch of restaurants.
#[derive(Debug, thiserror::Error)]
pub enum RecomputeError {
    #[error("Invalid since date '{value}': {message}")]
    InvalidSince { value: String, message: String },

    #[error("Invalid batch size {0}: must be greater than 0")]
    InvalidBatchSize(usize),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Failed to persist grade for restaurant {restaurant_id}: {message}")]
    Sink { restaurant_id: u64, message: String },
}

impl RegradeErrorCode for RecomputeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sink { .. } => error_code::SINK_ERROR,
            _ => error_code::RECOMPUTE_ERROR,
        }
    }
}
