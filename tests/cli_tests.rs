//! End-to-end tests of the `symptom-solver` binary.
//!
//! Each test points both data directories at a temporary directory so the
//! loader sees exactly the tables the test writes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("symptom-solver").expect("binary should build");
    cmd.arg("--data-dir")
        .arg(data_dir)
        .arg("--fallback-data-dir")
        .arg(data_dir);
    cmd
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let output = command(data_dir)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout should be a single JSON value")
}

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).expect("failed to write fixture");
}

#[test]
fn test_predict_with_fallback_tables() {
    let dir = TempDir::new().unwrap();
    let result = run_json(
        dir.path(),
        &["predict", r#"["itching", "skin_rash", "nodal_skin_eruptions"]"#],
    );

    assert_eq!(result["disease"], "Fungal infection");
    assert_eq!(result["matching_count"], 3);
    assert!((result["confidence"].as_f64().unwrap() - 45.0).abs() < 1e-9);
    assert!(result["description"].is_string());
    assert_eq!(result["precautions"].as_array().unwrap().len(), 4);
    assert!(result.get("error").is_none());
}

#[test]
fn test_predict_invalid_symptom_format() {
    let dir = TempDir::new().unwrap();
    let result = run_json(dir.path(), &["predict", "not json"]);
    assert_eq!(result["error"], "Invalid symptoms format");
}

#[test]
fn test_predict_empty_list_reports_error() {
    let dir = TempDir::new().unwrap();
    let result = run_json(dir.path(), &["predict", "[]"]);
    assert_eq!(result["error"], "No symptoms provided");
}

#[test]
fn test_predict_unknown_symptoms() {
    let dir = TempDir::new().unwrap();
    let result = run_json(dir.path(), &["predict", r#"["glowing_skin"]"#]);

    assert_eq!(result["disease"], "Unknown");
    assert!(result["confidence"].as_f64().unwrap().abs() < 1e-9);
    assert!(result.get("description").is_none());
}

#[test]
fn test_dropped_severity_row_uses_default_weight() {
    let dir = TempDir::new().unwrap();
    write(&dir, "dataset.csv", "Disease,Symptom_1,Symptom_2\nFlu,fever,cough\n");
    write(&dir, "symptom_severity.csv", "Symptom,weight\nfever,high\ncough,6\n");

    let result = run_json(dir.path(), &["predict", r#"["fever"]"#]);

    // fever falls back to weight 3: 0.35 * 3/9 + 0.25 * 1/2 + 0.25 * 1/5
    let score = 0.35 * (3.0 / 9.0) + 0.25 * 0.5 + 0.25 * 0.2;
    let expected = score * 60.0 * 0.7;
    assert_eq!(result["disease"], "Flu");
    assert!((result["confidence"].as_f64().unwrap() - expected).abs() < 1e-9);
    // Flu is in neither the loaded nor the fallback description table
    assert!(result.get("description").is_none());
    assert!(result.get("precautions").is_none());
}

#[test]
fn test_loaded_descriptions_are_attached() {
    let dir = TempDir::new().unwrap();
    write(&dir, "dataset.csv", "Disease,Symptom_1\nDengue,pain_behind_the_eyes\n");
    write(
        &dir,
        "disease_description.csv",
        "Disease,Description\nDengue,\"A mosquito-borne viral infection, common in the tropics.\"\n",
    );
    write(
        &dir,
        "disease_precaution.csv",
        "Disease,Precaution_1,Precaution_2\nDengue,drink papaya leaf juice,null\n",
    );

    let result = run_json(dir.path(), &["predict", r#"["pain_behind_the_eyes"]"#]);

    assert_eq!(result["disease"], "Dengue");
    assert_eq!(
        result["description"],
        "A mosquito-borne viral infection, common in the tropics."
    );
    assert_eq!(result["precautions"], serde_json::json!(["drink papaya leaf juice"]));
}

#[test]
fn test_primary_directory_preferred() {
    let primary = TempDir::new().unwrap();
    let secondary = TempDir::new().unwrap();
    write(&primary, "dataset.csv", "Disease,Symptom_1\nPrimary pox,spots\n");
    write(&secondary, "dataset.csv", "Disease,Symptom_1\nSecondary pox,spots\n");

    let output = Command::cargo_bin("symptom-solver")
        .unwrap()
        .arg("--data-dir")
        .arg(primary.path())
        .arg("--fallback-data-dir")
        .arg(secondary.path())
        .args(["predict", r#"["spots"]"#])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(result["disease"], "Primary pox");
}

#[test]
fn test_symptoms_lists_dataset_and_training_columns() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "dataset.csv",
        "Disease,Symptom_1,Symptom_2\nFlu,fever,cough\nCold,sneezing,cough\n",
    );
    write(&dir, "Training.csv", "chills,fever,prognosis\n1,0,Malaria\n");

    let result = run_json(dir.path(), &["symptoms"]);
    assert_eq!(
        result,
        serde_json::json!(["chills", "cough", "fever", "sneezing"])
    );
}

#[test]
fn test_symptoms_with_fallback_vocabulary() {
    let dir = TempDir::new().unwrap();
    let result = run_json(dir.path(), &["symptoms"]);
    let symptoms = result.as_array().unwrap();

    assert_eq!(symptoms.len(), 30);
    assert!(symptoms.contains(&Value::from("itching")));
}

#[test]
fn test_diagnostics_stay_off_stdout() {
    let dir = TempDir::new().unwrap();
    command(dir.path())
        .args(["--verbose", "predict", r#"["chills"]"#])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("fallback"));
}

#[test]
fn test_text_output() {
    let dir = TempDir::new().unwrap();
    command(dir.path())
        .args(["--format", "text", "predict", r#"["itching", "skin_rash"]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disease:     Fungal infection"))
        .stdout(predicate::str::contains("Precautions:"));
}
