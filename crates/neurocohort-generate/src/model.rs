use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::params::{DEFAULT_ROWS, DEFAULT_SEED};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of admissions to generate.
    pub rows: usize,
    /// Seed for the single random stream of a run.
    pub seed: u64,
    /// Path of the CSV output.
    pub out_path: PathBuf,
    /// Optional path for the JSON run report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            out_path: PathBuf::from("cohort.csv"),
            report_path: None,
        }
    }
}

/// Outcome of one missing-completely-at-random rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingRuleReport {
    pub column: String,
    pub percent: f64,
    pub rows: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub generated_at: String,
    pub seed: u64,
    pub rows: u64,
    pub columns: u64,
    pub readmitted: u64,
    pub readmission_rate: f64,
    pub missing_rules: Vec<MissingRuleReport>,
    /// Glucose cells blanked by the non-diabetic rule, overlap included.
    pub glucose_mar_rows: u64,
    /// Final missing cells per column, after every rule.
    pub missing_by_column: BTreeMap<String, u64>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            seed,
            rows: 0,
            columns: 0,
            readmitted: 0,
            readmission_rate: 0.0,
            missing_rules: Vec::new(),
            glucose_mar_rows: 0,
            missing_by_column: BTreeMap::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_missing(&mut self, column: &str) {
        *self.missing_by_column.entry(column.to_string()).or_insert(0) += 1;
    }
}
