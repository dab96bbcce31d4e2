//! Domain types consumed by the grading engine.

pub mod inspection;
pub mod restaurant;
pub mod serde_helpers;

pub use inspection::{Inspection, InspectionRecord};
pub use restaurant::Restaurant;
