//! Top-level Regrade configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{GradingConfig, RecomputeConfig};
use crate::constants::LATEST_YEAR_RANGE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`REGRADE_*`)
/// 3. Project config (`regrade.toml` in project root)
/// 4. User config (`~/.regrade/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegradeConfig {
    pub grading: GradingConfig,
    pub recompute: RecomputeConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub lowest_grade: Option<String>,
    pub latest_year: Option<i32>,
    pub batch_size: Option<usize>,
    pub threads: Option<usize>,
}

impl RegradeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join("regrade.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            lowest_grade = %config.grading.effective_lowest_grade(),
            latest_year = config.grading.effective_latest_year(),
            batch_size = config.recompute.effective_batch_size(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RegradeConfig) -> Result<(), ConfigError> {
        if let Some(terms) = &config.grading.forbidden_terms {
            if terms.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "grading.forbidden_terms".to_string(),
                    message: "must contain at least one term".to_string(),
                });
            }
            if let Some(idx) = terms.iter().position(|t| t.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "grading.forbidden_terms".to_string(),
                    message: format!("term at position {idx} is blank"),
                });
            }
        }
        if let Some(terms) = &config.grading.negation_terms {
            if let Some(idx) = terms.iter().position(|t| t.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: "grading.negation_terms".to_string(),
                    message: format!("phrase at position {idx} is blank"),
                });
            }
        }
        if let Some(grade) = &config.grading.lowest_grade {
            if grade.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "grading.lowest_grade".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        if let Some(year) = config.grading.latest_year {
            if !LATEST_YEAR_RANGE.contains(&year) {
                return Err(ConfigError::ValidationFailed {
                    field: "grading.latest_year".to_string(),
                    message: format!(
                        "must be between {} and {}",
                        LATEST_YEAR_RANGE.start(),
                        LATEST_YEAR_RANGE.end()
                    ),
                });
            }
        }
        if config.recompute.batch_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "recompute.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.recompute.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "recompute.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.regrade/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RegradeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RegradeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut RegradeConfig, other: &RegradeConfig) {
        // Grading
        if other.grading.forbidden_terms.is_some() {
            base.grading.forbidden_terms = other.grading.forbidden_terms.clone();
        }
        if other.grading.negation_terms.is_some() {
            base.grading.negation_terms = other.grading.negation_terms.clone();
        }
        if other.grading.lowest_grade.is_some() {
            base.grading.lowest_grade = other.grading.lowest_grade.clone();
        }
        if other.grading.latest_year.is_some() {
            base.grading.latest_year = other.grading.latest_year;
        }

        // Recompute
        if other.recompute.batch_size.is_some() {
            base.recompute.batch_size = other.recompute.batch_size;
        }
        if other.recompute.threads.is_some() {
            base.recompute.threads = other.recompute.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `REGRADE_LOWEST_GRADE`, `REGRADE_BATCH_SIZE`, etc.
    /// Term lists are comma-separated.
    fn apply_env_overrides(config: &mut RegradeConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("REGRADE_FORBIDDEN_TERMS") {
            config.grading.forbidden_terms = Some(split_list(&val));
        }
        if let Ok(val) = std::env::var("REGRADE_NEGATION_TERMS") {
            config.grading.negation_terms = Some(split_list(&val));
        }
        if let Ok(val) = std::env::var("REGRADE_LOWEST_GRADE") {
            config.grading.lowest_grade = Some(val.trim().to_string());
        }
        if let Ok(val) = std::env::var("REGRADE_LATEST_YEAR") {
            config.grading.latest_year = Some(parse_env("REGRADE_LATEST_YEAR", &val)?);
        }
        if let Ok(val) = std::env::var("REGRADE_BATCH_SIZE") {
            config.recompute.batch_size = Some(parse_env("REGRADE_BATCH_SIZE", &val)?);
        }
        if let Ok(val) = std::env::var("REGRADE_THREADS") {
            config.recompute.threads = Some(parse_env("REGRADE_THREADS", &val)?);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RegradeConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.lowest_grade {
            config.grading.lowest_grade = Some(v.clone());
        }
        if let Some(v) = cli.latest_year {
            config.grading.latest_year = Some(v);
        }
        if let Some(v) = cli.batch_size {
            config.recompute.batch_size = Some(v);
        }
        if let Some(v) = cli.threads {
            config.recompute.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvValue {
        key: key.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

/// Returns the user-level config directory: `~/.regrade/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".regrade"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
