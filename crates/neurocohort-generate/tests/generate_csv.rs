use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use neurocohort_core::{COLUMN_COUNT, Category, validate_cohort};
use neurocohort_generate::{GenerateOptions, GenerationEngine, GenerationError};

fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn temp_path(label: &str, extension: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "neurocohort_generate_{label}_{}.{extension}",
        uuid::Uuid::new_v4()
    ));
    path
}

fn options(label: &str, rows: usize, seed: u64) -> GenerateOptions {
    GenerateOptions {
        rows,
        seed,
        out_path: temp_path(label, "csv"),
        report_path: None,
    }
}

#[test]
fn generate_is_byte_identical_for_same_seed() {
    let engine_a = GenerationEngine::new(options("run_a", 300, 2025));
    let engine_b = GenerationEngine::new(options("run_b", 300, 2025));

    let result_a = engine_a.run().expect("run generation A");
    let result_b = engine_b.run().expect("run generation B");

    let hash_a = hash_file(&result_a.out_path).expect("hash cohort A");
    let hash_b = hash_file(&result_b.out_path).expect("hash cohort B");
    assert_eq!(hash_a, hash_b, "cohort.csv should be deterministic");
    assert_eq!(result_a.table, result_b.table);
}

#[test]
fn different_seed_changes_output_but_stays_in_range() {
    let base = GenerationEngine::new(options("seed_a", 300, 2025))
        .run()
        .expect("run seed 2025");
    let other = GenerationEngine::new(options("seed_b", 300, 7))
        .run()
        .expect("run seed 7");

    assert_ne!(
        hash_file(&base.out_path).expect("hash base"),
        hash_file(&other.out_path).expect("hash other")
    );
    validate_cohort(&other.table).expect("other seed respects catalog");
}

#[test]
fn csv_has_header_and_one_line_per_row() {
    let result = GenerationEngine::new(options("shape", 120, 2025))
        .run()
        .expect("run generation");
    let contents = fs::read_to_string(&result.out_path).expect("read cohort.csv");
    let mut lines = contents.lines();

    let header = lines.next().expect("header line");
    let columns: Vec<&str> = header.split(',').collect();
    assert_eq!(columns.len(), COLUMN_COUNT);
    assert_eq!(&columns[..3], &["subject_id", "hadm_id", "readmit_30d"]);

    let data: Vec<&str> = lines.collect();
    assert_eq!(data.len(), 120);
    assert!(data[0].starts_with("100001,200001,"));
    assert_eq!(result.report.bytes_written, contents.len() as u64);
}

#[test]
fn report_is_written_when_requested() {
    let mut opts = options("report", 200, 2025);
    let report_path = temp_path("report", "json");
    opts.report_path = Some(report_path.clone());

    let result = GenerationEngine::new(opts).run().expect("run generation");
    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("read report json"),
    )
    .expect("parse report");

    assert_eq!(report.get("rows").and_then(|v| v.as_u64()), Some(200));
    assert_eq!(
        report.get("columns").and_then(|v| v.as_u64()),
        Some(COLUMN_COUNT as u64)
    );
    assert_eq!(
        report.get("readmitted").and_then(|v| v.as_u64()),
        Some(result.report.readmitted)
    );
    let rules = report
        .get("missing_rules")
        .and_then(|v| v.as_array())
        .expect("missing_rules array");
    assert_eq!(rules.len(), 9);
}

#[test]
fn four_row_scenario() {
    let result = GenerationEngine::new(options("four", 4, 2025))
        .run()
        .expect("run generation");
    assert_eq!(result.table.len(), 4);

    let first = &result.table.rows()[0];
    assert!((18..=99).contains(&first.age_at_admit));
    assert!(["M", "F"].contains(&first.gender.label()));
    assert!(matches!(first.cells()[2].as_f64(), Some(v) if v == 0.0 || v == 1.0));
}

#[test]
fn zero_rows_is_rejected() {
    let result = GenerationEngine::new(options("empty", 0, 2025)).generate();
    assert!(matches!(result, Err(GenerationError::InvalidModel(_))));
}
