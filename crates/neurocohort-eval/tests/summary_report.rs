use neurocohort_core::{
    AdmissionRecord, AdmissionType, CohortTable, Diagnoses, Gender, Insurance, Labs,
    MaritalStatus, Medications, Race,
};
use neurocohort_eval::{LAB_COLUMNS, render_summary, summarize};
use neurocohort_generate::{GenerateOptions, GenerationEngine};

fn record(index: i64, gender: Gender, age: i64, readmit: bool) -> AdmissionRecord {
    AdmissionRecord {
        subject_id: 100_001 + index,
        hadm_id: 200_001 + index,
        readmit_30d: readmit,
        age_at_admit: age,
        gender,
        race: Race::Black,
        insurance: Insurance::Medicaid,
        marital_status: MaritalStatus::Single,
        los_days: 4.0,
        admission_type: AdmissionType::Urgent,
        prior_admits_12m: 1,
        had_icu_stay: index == 0,
        icu_los_days: if index == 0 { 2.5 } else { 0.0 },
        num_diagnoses: 6,
        diagnoses: Diagnoses::default(),
        labs: Labs {
            creatinine: Some(1.0 + index as f64),
            hemoglobin: None,
            wbc: Some(7.5),
            glucose: Some(110),
            sodium: Some(140),
            potassium: Some(4.0),
            bun: Some(16),
            platelet: Some(250),
        },
        medications: Medications {
            num_medications: Some(7),
            ..Medications::default()
        },
    }
}

fn small_table() -> CohortTable {
    CohortTable::new(vec![
        record(0, Gender::Female, 60, true),
        record(1, Gender::Male, 70, false),
        record(2, Gender::Female, 80, false),
        record(3, Gender::Male, 90, false),
    ])
}

#[test]
fn headline_rates_are_percentages() {
    let summary = summarize(&small_table());
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.columns, 37);
    assert_eq!(summary.readmitted, 1);
    assert_eq!(summary.readmission_rate, 25.0);
    assert_eq!(summary.female_rate, 50.0);
    assert_eq!(summary.icu_rate, 25.0);
    assert_eq!(summary.mean_age, 75.0);
    assert_eq!(summary.mean_los_days, 4.0);
}

#[test]
fn missing_summary_lists_only_columns_with_gaps() {
    let summary = summarize(&small_table());
    assert_eq!(summary.missing.len(), 1);
    assert_eq!(summary.missing[0].column, "hemoglobin");
    assert_eq!(summary.missing[0].count, 4);
    assert_eq!(summary.missing[0].percent, 100.0);
}

#[test]
fn lab_ranges_ignore_missing_values() {
    let summary = summarize(&small_table());
    assert_eq!(summary.lab_ranges.len(), LAB_COLUMNS.len());

    let creatinine = &summary.lab_ranges[0];
    assert_eq!(creatinine.column, "creatinine");
    assert_eq!(creatinine.min, Some(1.0));
    assert_eq!(creatinine.max, Some(4.0));
    assert_eq!(creatinine.mean, Some(2.5));

    let hemoglobin = &summary.lab_ranges[1];
    assert_eq!(hemoglobin.min, None);
    assert_eq!(hemoglobin.mean, None);
}

#[test]
fn empty_table_summarizes_to_zeros() {
    let summary = summarize(&CohortTable::new(Vec::new()));
    assert_eq!(summary.rows, 0);
    assert_eq!(summary.readmission_rate, 0.0);
    assert!(summary.missing.is_empty());
    assert!(summary.lab_ranges.iter().all(|lab| lab.mean.is_none()));
}

#[test]
fn rendered_report_has_all_sections() {
    let rendered = render_summary(&summarize(&small_table()), "cohort.csv");
    assert!(rendered.starts_with("Exported: cohort.csv"));
    assert!(rendered.contains("  Shape: 4 rows x 37 columns"));
    assert!(rendered.contains("  Readmission rate: 25.0% (1/4)"));
    assert!(rendered.contains("  Mean age: 75.0"));
    assert!(rendered.contains("Missing data summary:\n  hemoglobin: 4 (100.0%)"));
    assert!(rendered.contains("  creatinine: 1.0 - 4.0 (mean 2.5)"));
    assert!(rendered.contains("  hemoglobin: no values"));
}

#[test]
fn summary_of_default_cohort_serializes() {
    let cohort = GenerationEngine::new(GenerateOptions::default())
        .generate()
        .expect("generate");
    let summary = summarize(&cohort.table);

    assert_eq!(summary.rows, 2400);
    assert_eq!(summary.readmitted, cohort.readmitted());
    assert!(summary.mean_age > 55.0 && summary.mean_age < 75.0);
    let names: Vec<&str> = summary.missing.iter().map(|m| m.column.as_str()).collect();
    assert_eq!(
        names,
        [
            "creatinine",
            "hemoglobin",
            "wbc",
            "glucose",
            "sodium",
            "potassium",
            "bun",
            "platelet",
            "num_medications"
        ]
    );

    let json = serde_json::to_value(&summary).expect("serialize summary");
    assert_eq!(json["rows"], 2400);
}
