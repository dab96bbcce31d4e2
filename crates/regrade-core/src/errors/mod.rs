//! Error handling for Regrade.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod grading_error;
pub mod recompute_error;

pub use config_error::ConfigError;
pub use error_code::RegradeErrorCode;
pub use grading_error::GradingError;
pub use recompute_error::RecomputeError;
