//! Summary statistics and console reporting for generated cohorts.

pub mod report;
pub mod summary;

pub use report::render_summary;
pub use summary::{CohortSummary, LAB_COLUMNS, LabRange, MissingSummary, summarize};
