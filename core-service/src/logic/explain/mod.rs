//! Explain Module
//!
//! Per-feature ratings for the Results view (safe / warning / danger).

pub mod types;
pub mod engine;

pub use types::{FeatureInsight, InsightStatus};
pub use engine::{assess, overall_status};
