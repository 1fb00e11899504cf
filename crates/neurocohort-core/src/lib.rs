//! Core contracts for neurocohort.
//!
//! This crate defines the cohort column catalog, the categorical vocabularies,
//! the admission row model and the invariant checks shared by the generator,
//! the summary tooling and the CLI.

pub mod error;
pub mod record;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use record::{AdmissionRecord, CellValue, CohortTable, Diagnoses, Labs, Medications};
pub use schema::{Bounds, COHORT_COLUMNS, COLUMN_COUNT, Column, ColumnKind, column, column_index};
pub use types::{AdmissionType, Category, Gender, Insurance, MaritalStatus, Race};
pub use validation::validate_cohort;

/// First `subject_id` handed out by a generation run.
pub const SUBJECT_ID_BASE: i64 = 100_001;

/// First `hadm_id` handed out by a generation run.
pub const HADM_ID_BASE: i64 = 200_001;
