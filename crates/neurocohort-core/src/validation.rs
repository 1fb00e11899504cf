use crate::error::{Error, Result};
use crate::record::{CellValue, CohortTable};
use crate::schema::{COHORT_COLUMNS, ColumnKind};

/// Validate a cohort table against the column catalog.
///
/// This checks:
/// - `subject_id` and `hadm_id` are strictly increasing (hence unique)
/// - only nullable columns hold missing cells
/// - numeric cells fall inside their inclusive bounds
/// - flags are `0`/`1` and categories use catalog labels
/// - `icu_los_days` is `0.0` exactly when there was no ICU stay
pub fn validate_cohort(table: &CohortTable) -> Result<()> {
    let mut previous: Option<(i64, i64)> = None;

    for (row_index, row) in table.rows().iter().enumerate() {
        if let Some((subject_id, hadm_id)) = previous
            && (row.subject_id <= subject_id || row.hadm_id <= hadm_id)
        {
            return Err(Error::InvalidCohort(format!(
                "row {row_index}: identifiers must be strictly increasing"
            )));
        }
        previous = Some((row.subject_id, row.hadm_id));

        for (column, cell) in COHORT_COLUMNS.iter().zip(row.cells()) {
            match cell {
                CellValue::Null => {
                    if !column.nullable {
                        return Err(Error::InvalidCohort(format!(
                            "row {row_index}: missing value in non-nullable column {}",
                            column.name
                        )));
                    }
                }
                CellValue::Text(label) => {
                    if column.kind != ColumnKind::Category || !column.labels.contains(&label) {
                        return Err(Error::InvalidCohort(format!(
                            "row {row_index}: unexpected label '{label}' in column {}",
                            column.name
                        )));
                    }
                }
                CellValue::Int(_) | CellValue::Float(_) => {
                    let value = cell.as_f64().unwrap_or(f64::NAN);
                    if let Some(bounds) = column.bounds
                        && !bounds.contains(value)
                    {
                        return Err(Error::InvalidCohort(format!(
                            "row {row_index}: {} value {value} outside [{}, {}]",
                            column.name, bounds.min, bounds.max
                        )));
                    }
                }
            }
        }

        let icu_consistent = if row.had_icu_stay {
            row.icu_los_days >= 0.5
        } else {
            row.icu_los_days == 0.0
        };
        if !icu_consistent {
            return Err(Error::InvalidCohort(format!(
                "row {row_index}: icu_los_days {} inconsistent with had_icu_stay",
                row.icu_los_days
            )));
        }
    }

    Ok(())
}
