//! Configuration system for Regrade.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod grading_config;
pub mod recompute_config;
pub mod regrade_config;

pub use grading_config::GradingConfig;
pub use recompute_config::RecomputeConfig;
pub use regrade_config::{CliOverrides, RegradeConfig};
