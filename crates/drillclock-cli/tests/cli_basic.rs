//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temporary
//! directory so the user's real config is never touched.

use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_drillclock"))
        .args(args)
        .env("HOME", home)
        .env_remove("DRILLCLOCK_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_workouts_list() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["workouts", "list"]);
    assert_eq!(code, 0, "workouts list failed");
    assert!(stdout.contains("bodyweight-circuit"));
    assert!(stdout.contains("tabata-sprint"));
}

#[test]
fn test_workouts_list_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["workouts", "list", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_workouts_validate() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("legs.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "name = \"Legs\"\n\n[[exercises]]\nname = \"Squats\"\nwork_secs = 40\nrest_secs = 20\n"
    )
    .unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["workouts", "validate", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok: Legs"));
}

#[test]
fn test_workouts_validate_rejects_empty() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("empty.json");
    std::fs::write(&path, r#"{"name":"Empty","exercises":[]}"#).unwrap();

    let (code, _, stderr) = run_cli(home.path(), &["workouts", "validate", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_simulate_reports_completion() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["simulate", "--workout", "tabata-sprint"]);
    assert_eq!(code, 0);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["completed"], true);
    assert_eq!(summary["completed_count"], 8);
    assert_eq!(summary["elapsed_secs"], 230);
}

#[test]
fn test_simulate_unknown_workout_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["simulate", "--workout", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown workout"));
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "set", "run.lead_in_secs", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ok"));

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "run.lead_in_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5");
    assert!(home.path().join(".config/drillclock/config.toml").exists());
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "run.nope", "1"]);
    assert_eq!(code, 1);
}
