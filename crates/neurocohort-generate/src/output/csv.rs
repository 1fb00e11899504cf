use std::fs;
use std::io::Write;
use std::path::Path;

use neurocohort_core::{COHORT_COLUMNS, CohortTable};

/// Write the cohort as CSV in catalog column order. Returns the file size.
pub fn write_cohort_csv(path: &Path, table: &CohortTable) -> Result<u64, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    write_rows(&mut writer, table)?;
    drop(writer);
    Ok(fs::metadata(path)?.len())
}

/// Header from the catalog, then one record per admission.
pub fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    table: &CohortTable,
) -> Result<(), csv::Error> {
    writer.write_record(COHORT_COLUMNS.iter().map(|column| column.name))?;
    for row in table.rows() {
        writer.write_record(
            COHORT_COLUMNS
                .iter()
                .zip(row.cells())
                .map(|(column, cell)| cell.to_csv(column)),
        )?;
    }
    writer.flush()?;
    Ok(())
}
