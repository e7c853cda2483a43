//! End-to-end tests of the run loop over replayed landmark streams.

#![allow(clippy::unwrap_used, clippy::float_cmp)]
#![allow(deprecated)] // cargo_bin deprecation

mod common;

use std::fs;

use common::{
    calibration_frames, handctl, keys_from_stdout, pinch_at, write_replay, write_thresholds,
    EXPECTED_OPEN_THRESHOLD, SHORT_CALIBRATION,
};
use handctl_adapters::ThresholdStore;
use handctl_test_support::{FrameBuilder, HandBuilder};
use predicates::prelude::*;

#[test]
fn test_media_gestures_produce_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(
        &replay,
        &[
            pinch_at(0, 100.0),
            pinch_at(100, 145.0),
            pinch_at(1_000, 145.0),
            FrameBuilder::at_millis(1_100)
                .hand(HandBuilder::thumbs_up().build())
                .build(),
            pinch_at(2_000, 20.0),
        ],
    );

    let assert = handctl(dir.path())
        .arg("--replay")
        .arg(&replay)
        .assert()
        .success();
    assert_eq!(
        keys_from_stdout(&assert.get_output().stdout),
        vec!["l", "up", "j"]
    );
}

#[test]
fn test_cooldown_flag_suppresses_repeats() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(
        &replay,
        &[pinch_at(0, 10.0), pinch_at(1_000, 10.0), pinch_at(2_000, 10.0)],
    );

    let assert = handctl(dir.path())
        .args(["run", "--cooldown", "1.5", "--replay"])
        .arg(&replay)
        .assert()
        .success();
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["k", "k"]);
}

#[test]
fn test_quit_key_stops_processing() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(
        &replay,
        &[
            pinch_at(0, 10.0),
            FrameBuilder::at_millis(100).key('q').build(),
            pinch_at(1_000, 10.0),
        ],
    );

    let assert = handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .assert()
        .success();
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["k"]);
}

#[test]
fn test_mode_key_switches_to_keyboard() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    let tap_s = HandBuilder::right().index(130.0, 130.0).thumb(120.0, 130.0);
    write_replay(
        &replay,
        &[
            FrameBuilder::at_millis(0).key('m').build(),
            FrameBuilder::at_millis(100).hand(tap_s.build()).build(),
        ],
    );

    let assert = handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stderr(predicate::str::contains("Mode: KEYBOARD"));
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["s"]);
}

#[test]
fn test_missing_thresholds_trigger_calibration() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".handctl.toml"), SHORT_CALIBRATION).unwrap();
    let replay = dir.path().join("session.jsonl");
    let mut frames = calibration_frames();
    frames.push(pinch_at(2_000, 10.0));
    write_replay(&replay, &frames);

    let assert = handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stderr(predicate::str::contains("Calibration complete"));
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["k"]);

    let stored = ThresholdStore::new(dir.path().join("calibration.json"))
        .load()
        .unwrap()
        .unwrap();
    assert!((stored.open_hand_threshold - EXPECTED_OPEN_THRESHOLD).abs() < 1e-12);
    assert!((stored.swipe_threshold - 30.0).abs() < 1e-9);
}

#[test]
fn test_interrupted_calibration_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let replay = dir.path().join("session.jsonl");
    write_replay(&replay, &[pinch_at(0, 100.0), pinch_at(100, 100.0)]);

    handctl(dir.path())
        .args(["-v", "run", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stderr(predicate::str::contains("left unchanged"));
    assert!(!dir.path().join("calibration.json").exists());
}

#[test]
fn test_recalibrate_key_updates_threshold_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".handctl.toml"), SHORT_CALIBRATION).unwrap();
    let thresholds = dir.path().join("calibration.json");
    write_thresholds(&thresholds);

    let replay = dir.path().join("session.jsonl");
    let mut frames = vec![FrameBuilder::at_millis(0).key('c').build()];
    frames.extend(calibration_frames().into_iter().map(|mut f| {
        f.timestamp += std::time::Duration::from_millis(100);
        f
    }));
    write_replay(&replay, &frames);

    handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .assert()
        .success();

    let stored = ThresholdStore::new(&thresholds).load().unwrap().unwrap();
    assert!((stored.swipe_threshold - 30.0).abs() < 1e-9);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(&replay, &[pinch_at(0, 10.0)]);
    let mut text = String::from("READY\n{broken\n");
    text.push_str(&fs::read_to_string(&replay).unwrap());
    fs::write(&replay, text).unwrap();

    let assert = handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping frame"));
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["k"]);
}

#[test]
fn test_replay_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(
        &replay,
        &[FrameBuilder::at_millis(0)
            .hand(HandBuilder::thumbs_down().build())
            .build()],
    );

    let assert = handctl(dir.path())
        .args(["run", "--replay", "-"])
        .write_stdin(fs::read_to_string(&replay).unwrap())
        .assert()
        .success();
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["down"]);
}

#[test]
fn test_record_writes_replayable_stream() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    let recording = dir.path().join("recording.jsonl");
    write_replay(
        &replay,
        &[
            pinch_at(0, 10.0),
            FrameBuilder::at_millis(100).key('q').build(),
            pinch_at(1_000, 10.0),
        ],
    );

    handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&replay)
        .arg("--record")
        .arg(&recording)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&recording).unwrap().lines().count(), 2);

    let assert = handctl(dir.path())
        .args(["run", "--replay"])
        .arg(&recording)
        .assert()
        .success();
    assert_eq!(keys_from_stdout(&assert.get_output().stdout), vec!["k"]);
}

#[cfg(unix)]
#[test]
fn test_command_key_backend() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(&replay, &[pinch_at(0, 10.0)]);

    handctl(dir.path())
        .args(["run", "--keys", "command", "--key-command", "echo pressed", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stdout(predicate::str::contains("pressed k"));
}

#[test]
fn test_quiet_suppresses_feedback() {
    let dir = tempfile::tempdir().unwrap();
    write_thresholds(&dir.path().join("calibration.json"));
    let replay = dir.path().join("session.jsonl");
    write_replay(&replay, &[pinch_at(0, 10.0)]);

    handctl(dir.path())
        .args(["run", "-q", "--replay"])
        .arg(&replay)
        .assert()
        .success()
        .stderr(predicate::str::contains("Play / Pause").not());
}
