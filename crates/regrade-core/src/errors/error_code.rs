//! RegradeErrorCode trait for the persistence/display boundary.

/// Every error enum implements this to provide a stable, machine-readable
/// code alongside its human-readable message.
pub trait RegradeErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const GRADING_ERROR: &str = "GRADING_ERROR";
pub const RECOMPUTE_ERROR: &str = "RECOMPUTE_ERROR";
pub const SINK_ERROR: &str = "SINK_ERROR";
