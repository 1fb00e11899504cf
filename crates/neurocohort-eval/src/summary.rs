use serde::Serialize;

use neurocohort_core::{COHORT_COLUMNS, CohortTable, Gender};

/// Lab columns reported with min, max and mean.
pub const LAB_COLUMNS: [&str; 8] = [
    "creatinine",
    "hemoglobin",
    "wbc",
    "glucose",
    "sodium",
    "potassium",
    "bun",
    "platelet",
];

/// Headline statistics of a generated cohort.
///
/// Rates are percentages. Means over an empty table are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub rows: u64,
    pub columns: u64,
    pub readmitted: u64,
    pub readmission_rate: f64,
    pub mean_age: f64,
    pub female_rate: f64,
    pub mean_los_days: f64,
    pub icu_rate: f64,
    /// Columns with at least one missing cell, in catalog order.
    pub missing: Vec<MissingSummary>,
    pub lab_ranges: Vec<LabRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSummary {
    pub column: String,
    pub count: u64,
    pub percent: f64,
}

/// Range of a lab over its present values; `None` when every value is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabRange {
    pub column: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

pub fn summarize(table: &CohortTable) -> CohortSummary {
    let rows = table.rows();
    let count = rows.len();
    let share = |hits: usize| percent(hits as u64, count);
    let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    let readmitted = rows.iter().filter(|row| row.readmit_30d).count();
    let female = rows.iter().filter(|row| row.gender == Gender::Female).count();
    let icu = rows.iter().filter(|row| row.had_icu_stay).count();

    let missing = COHORT_COLUMNS
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            let nulls = table
                .column_values(index)
                .iter()
                .filter(|cell| cell.is_null())
                .count() as u64;
            (nulls > 0).then(|| MissingSummary {
                column: column.name.to_string(),
                count: nulls,
                percent: percent(nulls, count),
            })
        })
        .collect();

    CohortSummary {
        rows: count as u64,
        columns: COHORT_COLUMNS.len() as u64,
        readmitted: readmitted as u64,
        readmission_rate: share(readmitted),
        mean_age: mean(rows.iter().map(|row| row.age_at_admit as f64).sum()),
        female_rate: share(female),
        mean_los_days: mean(rows.iter().map(|row| row.los_days).sum()),
        icu_rate: share(icu),
        missing,
        lab_ranges: LAB_COLUMNS.iter().map(|lab| lab_range(table, lab)).collect(),
    }
}

fn lab_range(table: &CohortTable, name: &str) -> LabRange {
    let values: Vec<f64> = neurocohort_core::column_index(name)
        .map(|index| {
            table
                .column_values(index)
                .iter()
                .filter_map(|cell| cell.as_f64())
                .collect()
        })
        .unwrap_or_default();

    let (min, max, mean) = if values.is_empty() {
        (None, None, None)
    } else {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        (Some(min), Some(max), Some(mean))
    };

    LabRange {
        column: name.to_string(),
        min,
        max,
        mean,
    }
}

fn percent(hits: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / total as f64
    }
}
