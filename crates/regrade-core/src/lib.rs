//! # regrade-core
//!
//! Foundation crate for the Regrade grading engine.
//! Defines the inspection/restaurant types, errors, config, tracing setup,
//! and constants. `regrade-analysis` builds on top of it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::RegradeConfig;
pub use types::{Inspection, InspectionRecord, Restaurant};
