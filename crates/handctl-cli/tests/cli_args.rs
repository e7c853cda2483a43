//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

mod common;

use common::handctl;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("run")
                .and(predicate::str::contains("calibrate"))
                .and(predicate::str::contains("thresholds")),
        );
}

#[test]
fn test_missing_source_shows_error() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No landmark source"));
}

#[test]
fn test_missing_replay_file() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--replay", "does-not-exist.jsonl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn test_replay_conflicts_with_tracker() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--replay", "a.jsonl", "--tracker", "tracker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_cooldown_rejected() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--cooldown", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'soon' is not a valid number"));
}

#[test]
fn test_invalid_min_confidence_rejected() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["calibrate", "--min-confidence", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 is not in 0.0..=1.0"));
}

#[test]
fn test_invalid_mode_rejected() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--mode", "typing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode"));
}

#[test]
fn test_invalid_key_backend_rejected() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--keys", "xdotool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_command_backend_requires_command() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--keys", "command", "--replay", "-"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--key-command"));
}

#[cfg(not(feature = "enigo"))]
#[test]
fn test_enigo_backend_needs_feature() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["run", "--keys", "enigo", "--replay", "-"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--features enigo"));
}

#[test]
fn test_thresholds_path_default() {
    let dir = tempfile::tempdir().unwrap();
    handctl(dir.path())
        .args(["thresholds", "path"])
        .assert()
        .success()
        .stdout(predicate::str::diff("calibration.json\n"));
}

#[test]
fn test_thresholds_show_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = handctl(dir.path())
        .args(["thresholds", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["open_hand_threshold"], 0.2);
    assert_eq!(value["swipe_threshold"], 100.0);
}

#[test]
fn test_thresholds_show_corrupt_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("calibration.json"), "{oops").unwrap();
    handctl(dir.path())
        .args(["thresholds", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid threshold file"));
}
