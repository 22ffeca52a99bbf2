use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn snapshot_evaluation_prints_each_condition() {
    Command::cargo_bin("gate_eval")
        .expect("gate_eval bin")
        .args([
            "--conditions",
            "configs/conditions/low_orbit.yaml",
            "--telemetry",
            "data/telemetry/low_orbit.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== low_kerbin_orbit ==="))
        .stdout(predicate::str::contains("[0] Orbit -> valid"))
        .stdout(predicate::str::contains("[1] Orbit -> valid"))
        .stdout(predicate::str::contains("Craft sphere of influence equal to Kerbin"))
        .stdout(predicate::str::contains("Outcome   : valid"));
}

#[test]
fn snapshot_evaluation_writes_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("reports/low_orbit.json");

    Command::cargo_bin("gate_eval")
        .expect("gate_eval bin")
        .args([
            "--conditions",
            "configs/conditions/low_orbit.yaml",
            "--telemetry",
            "data/telemetry/low_orbit.yaml",
            "--elapsed",
            "2.5",
            "--report",
            report_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(&report_path).expect("report json");
    let report: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(report["scenario"], "low_kerbin_orbit");
    assert_eq!(report["outcome"], "valid");
    assert_eq!(report["elapsed_s"], 2.5);
    let conditions = report["conditions"].as_array().expect("conditions array");
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0]["data_rate_modifier"], 1.5);
    assert_eq!(conditions[1]["restriction"], true);
    assert_eq!(conditions[1]["exclusion"], "reset");
}

#[test]
fn trace_replay_writes_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("reentry.csv");

    Command::cargo_bin("gate_eval")
        .expect("gate_eval bin")
        .args([
            "--conditions",
            "configs/conditions/low_orbit.yaml",
            "--trace",
            "data/telemetry/reentry_trace.yaml",
            "--output",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv reader");
    let headers = reader.headers().expect("csv headers").clone();
    let outcome_col = headers.iter().position(|h| h == "outcome").unwrap();
    let per_condition_col = headers
        .iter()
        .position(|h| h == "condition_outcomes")
        .unwrap();

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    let outcomes: Vec<&str> = rows.iter().map(|r| &r[outcome_col]).collect();
    assert_eq!(outcomes, ["valid", "valid", "reset"]);
    assert_eq!(&rows[2][per_condition_col], "invalid;reset");
}

#[test]
fn telemetry_or_trace_is_required() {
    Command::cargo_bin("gate_eval")
        .expect("gate_eval bin")
        .args(["--conditions", "configs/conditions/low_orbit.yaml"])
        .assert()
        .failure();
}

#[test]
fn unknown_condition_type_fails_evaluation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("biome.toml");
    std::fs::write(&path, "[[CONDITION]]\nconditionType = \"Biome\"\n").unwrap();

    Command::cargo_bin("gate_eval")
        .expect("gate_eval bin")
        .args([
            "--conditions",
            path.to_str().unwrap(),
            "--telemetry",
            "data/telemetry/low_orbit.yaml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type `Biome`"));
}
