use neurocohort_core::{
    AdmissionRecord, COHORT_COLUMNS, COLUMN_COUNT, column, column_index, validate_cohort,
};
use neurocohort_generate::missing::missing_count;
use neurocohort_generate::params::{DEFAULT_ROWS, MISSING_RULES};
use neurocohort_generate::{GenerateOptions, GeneratedCohort, GenerationEngine};

fn default_cohort() -> GeneratedCohort {
    GenerationEngine::new(GenerateOptions::default())
        .generate()
        .expect("generate default cohort")
}

fn null_count(cohort: &GeneratedCohort, name: &str) -> usize {
    let index = column_index(name).expect("column exists");
    cohort
        .table
        .column_values(index)
        .iter()
        .filter(|cell| cell.is_null())
        .count()
}

#[test]
fn default_cohort_has_documented_shape() {
    let cohort = default_cohort();
    assert_eq!(cohort.table.len(), DEFAULT_ROWS);
    assert_eq!(COHORT_COLUMNS.len(), COLUMN_COUNT);
    validate_cohort(&cohort.table).expect("every field inside its range");

    let rows = cohort.table.rows();
    assert_eq!(rows[0].subject_id, 100_001);
    assert_eq!(rows[DEFAULT_ROWS - 1].hadm_id, 200_000 + DEFAULT_ROWS as i64);
    assert!(rows.windows(2).all(|pair| pair[0].subject_id < pair[1].subject_id));
    assert!(rows.windows(2).all(|pair| pair[0].hadm_id < pair[1].hadm_id));

    let age_bounds = column("age_at_admit").and_then(|c| c.bounds).expect("age bounds");
    assert_eq!((age_bounds.min, age_bounds.max), (18.0, 99.0));
    assert!(rows.iter().all(|row| (18..=99).contains(&row.age_at_admit)));
}

#[test]
fn readmission_rate_is_in_expected_band() {
    let cohort = default_cohort();
    let rate = cohort.readmitted() as f64 / cohort.table.len() as f64;
    assert!((0.20..=0.35).contains(&rate), "readmission rate {rate}");
    assert!(
        cohort
            .readmission_probability
            .iter()
            .all(|p| *p > 0.0 && *p < 1.0)
    );
}

#[test]
fn base_missingness_matches_declared_percentages() {
    let cohort = default_cohort();
    for rule in MISSING_RULES.iter().filter(|rule| rule.column != "glucose") {
        let expected = missing_count(DEFAULT_ROWS, rule.percent);
        assert_eq!(
            null_count(&cohort, rule.column),
            expected,
            "missing count for {}",
            rule.column
        );
    }
    assert_eq!(missing_count(DEFAULT_ROWS, 7.2), 172);
}

#[test]
fn glucose_missingness_is_union_of_base_and_mar() {
    let cohort = default_cohort();
    let glucose_rule = MISSING_RULES
        .iter()
        .find(|rule| rule.column == "glucose")
        .expect("glucose rule");
    let masks = &cohort.glucose_masks;
    let base = masks.base.iter().filter(|flag| **flag).count();
    let mar = masks.mar.iter().filter(|flag| **flag).count();

    assert_eq!(base, missing_count(DEFAULT_ROWS, glucose_rule.percent));
    assert_eq!(mar as u64, cohort.glucose_mar_rows);
    assert!(mar > 0);
    assert_eq!(
        null_count(&cohort, "glucose"),
        base + mar - masks.overlap()
    );

    for (row, record) in cohort.table.rows().iter().enumerate() {
        let missing = record.labs.glucose.is_none();
        assert_eq!(missing, masks.base[row] || masks.mar[row], "row {row}");
        if masks.mar[row] {
            assert!(!record.diagnoses.diabetes, "row {row} is diabetic");
        }
    }
}

#[test]
fn untouched_columns_have_no_missing_values() {
    let cohort = default_cohort();
    for column in COHORT_COLUMNS.iter().filter(|column| !column.nullable) {
        assert_eq!(null_count(&cohort, column.name), 0, "{}", column.name);
    }
}

#[test]
fn ckd_lowers_hemoglobin_and_raises_creatinine() {
    let cohort = default_cohort();
    let mean = |ckd: bool, pick: &dyn Fn(&AdmissionRecord) -> Option<f64>| {
        let values: Vec<f64> = cohort
            .table
            .rows()
            .iter()
            .filter(|row| row.diagnoses.ckd == ckd)
            .filter_map(pick)
            .collect();
        values.iter().sum::<f64>() / values.len() as f64
    };

    let hemoglobin = |row: &AdmissionRecord| row.labs.hemoglobin;
    let creatinine = |row: &AdmissionRecord| row.labs.creatinine;
    assert!(mean(true, &hemoglobin) < mean(false, &hemoglobin));
    assert!(mean(true, &creatinine) > mean(false, &creatinine));
}

fn share(rows: &[&AdmissionRecord], pick: impl Fn(&AdmissionRecord) -> bool) -> f64 {
    rows.iter().filter(|&&row| pick(row)).count() as f64 / rows.len() as f64
}

#[test]
fn conditional_medications_follow_diagnoses() {
    let cohort = default_cohort();
    let (diabetic, other): (Vec<&AdmissionRecord>, Vec<&AdmissionRecord>) = cohort
        .table
        .rows()
        .iter()
        .partition(|row| row.diagnoses.diabetes);
    assert!(share(&diabetic, |row| row.medications.on_insulin) > 0.4);
    assert!(share(&other, |row| row.medications.on_insulin) < 0.1);

    let (epileptic, other): (Vec<&AdmissionRecord>, Vec<&AdmissionRecord>) = cohort
        .table
        .rows()
        .iter()
        .partition(|row| row.diagnoses.epilepsy);
    assert!(share(&epileptic, |row| row.medications.on_antiepileptic) > 0.7);
    assert!(share(&other, |row| row.medications.on_antiepileptic) < 0.2);
}
