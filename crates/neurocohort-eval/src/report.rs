use crate::summary::CohortSummary;

/// Render the console summary printed after a run.
pub fn render_summary(summary: &CohortSummary, out_label: &str) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Exported: {out_label}"));
    lines.push(format!(
        "  Shape: {} rows x {} columns",
        summary.rows, summary.columns
    ));
    lines.push(format!(
        "  Readmission rate: {:.1}% ({}/{})",
        summary.readmission_rate, summary.readmitted, summary.rows
    ));
    lines.push(format!("  Mean age: {:.1}", summary.mean_age));
    lines.push(format!("  Female: {:.1}%", summary.female_rate));
    lines.push(format!("  Mean LOS: {:.1} days", summary.mean_los_days));
    lines.push(format!("  ICU rate: {:.1}%", summary.icu_rate));
    lines.push(String::new());

    lines.push("Missing data summary:".to_string());
    if summary.missing.is_empty() {
        lines.push("  none".to_string());
    }
    for missing in &summary.missing {
        lines.push(format!(
            "  {}: {} ({:.1}%)",
            missing.column, missing.count, missing.percent
        ));
    }
    lines.push(String::new());

    lines.push("Lab value ranges:".to_string());
    for lab in &summary.lab_ranges {
        match (lab.min, lab.max, lab.mean) {
            (Some(min), Some(max), Some(mean)) => lines.push(format!(
                "  {}: {min:.1} - {max:.1} (mean {mean:.1})",
                lab.column
            )),
            _ => lines.push(format!("  {}: no values", lab.column)),
        }
    }

    lines.join("\n")
}
