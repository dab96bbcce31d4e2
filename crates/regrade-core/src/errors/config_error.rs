//! Errors raised while resolving `RegradeConfig` from its layers.

use super::error_code::{self, RegradeErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested `regrade.toml` does not exist.
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    /// A merged value breaks a grading or recompute constraint, e.g. an empty
    /// forbidden vocabulary or a zero batch size.
    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    /// A `REGRADE_*` environment variable could not be parsed.
    #[error("Environment variable {key} has invalid value '{value}': {message}")]
    InvalidEnvValue {
        key: String,
        value: String,
        message: String,
    },
}

impl RegradeErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
