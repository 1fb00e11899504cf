use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str, extension: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "neurocohort_cli_{label}_{}.{extension}",
        uuid::Uuid::new_v4()
    ));
    path
}

#[test]
fn generate_writes_csv_report_and_json_log() {
    let out = temp_path("cohort", "csv");
    let report = temp_path("report", "json");
    let log = temp_path("run", "log");

    let output = Command::new(env!("CARGO_BIN_EXE_neurocohort"))
        .arg("generate")
        .arg("--out")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .arg("--log-file")
        .arg(&log)
        .env_remove("RUST_LOG")
        .output()
        .expect("run neurocohort");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("Generating 2400 synthetic neurological admissions..."));
    assert!(stdout.contains("  Shape: 2400 rows x 37 columns"));
    assert!(stdout.contains("Lab value ranges:"));

    let csv = fs::read_to_string(&out).expect("read csv");
    assert_eq!(csv.lines().count(), 2401);

    let report_json: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).expect("read report")).expect("parse report");
    assert_eq!(report_json["rows"], 2400);
    assert_eq!(report_json["seed"], 2025);
    assert_eq!(
        report_json["bytes_written"].as_u64(),
        Some(fs::metadata(&out).expect("csv metadata").len())
    );

    let events: Vec<serde_json::Value> = fs::read_to_string(&log)
        .expect("read log")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json log line"))
        .collect();
    let messages: Vec<&str> = events
        .iter()
        .filter_map(|event| event["fields"]["message"].as_str())
        .collect();
    assert!(messages.contains(&"cli generate"));
    assert!(messages.contains(&"cohort exported"));
    assert!(messages.contains(&"missingness applied"));
    assert!(events.iter().all(|event| event["timestamp"].is_string()));
    // debug events stay out under the default filter
    assert!(!messages.contains(&"report written"));

    let _ = fs::remove_file(out);
    let _ = fs::remove_file(report);
    let _ = fs::remove_file(log);
}

#[test]
fn unknown_subcommand_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_neurocohort"))
        .arg("simulate")
        .output()
        .expect("run neurocohort");
    assert!(!output.status.success());
}
