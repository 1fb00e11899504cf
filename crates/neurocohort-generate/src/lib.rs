//! Synthetic neurological-admission cohort generator.
//!
//! This crate draws every cohort column from the hand-tuned model in
//! [`params`], derives the 30-day readmission label from a logistic risk
//! score, injects missing lab values and writes the table as CSV. Output is
//! deterministic for a given seed and row count.

pub mod engine;
pub mod errors;
pub mod missing;
pub mod model;
pub mod output;
pub mod params;
pub mod risk;
pub mod sampling;

pub use engine::{GeneratedCohort, GenerationEngine, GenerationResult, GlucoseMasks};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, MissingRuleReport};
