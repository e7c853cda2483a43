//! Integration tests for threshold persistence.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::fs;

use handctl_adapters::ThresholdStore;
use handctl_core::domain::Thresholds;
use tempfile::TempDir;

#[test]
fn test_missing_file_loads_none() {
    let dir = TempDir::new().unwrap();
    let store = ThresholdStore::new(dir.path().join("calibration.json"));
    assert!(!store.exists());
    assert!(store.load().unwrap().is_none());
    assert_eq!(store.load_or_default().unwrap(), Thresholds::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = ThresholdStore::new(dir.path().join("calibration.json"));
    let thresholds = Thresholds::new(0.18, 85.5).unwrap();

    store.save(&thresholds).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap(), Some(thresholds));

    let text = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["open_hand_threshold"], 0.18);
    assert_eq!(value["swipe_threshold"], 85.5);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = ThresholdStore::new(dir.path().join("calibration.json"));
    store.save(&Thresholds::default()).unwrap();
    store.save(&Thresholds::new(0.3, 50.0).unwrap()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["calibration.json".to_string()]);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = ThresholdStore::new(dir.path().join("state/handctl/calibration.json"));
    store.save(&Thresholds::default()).unwrap();
    assert!(store.exists());
}

#[test]
fn test_missing_key_uses_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calibration.json");
    fs::write(&path, r#"{"open_hand_threshold": 0.25}"#).unwrap();

    let loaded = ThresholdStore::new(&path).load().unwrap().unwrap();
    assert_eq!(loaded.open_hand_threshold, 0.25);
    assert_eq!(loaded.swipe_threshold, Thresholds::default().swipe_threshold);
}

#[test]
fn test_negative_value_falls_back_per_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calibration.json");
    fs::write(&path, r#"{"open_hand_threshold": -1.0, "swipe_threshold": 70.0}"#).unwrap();

    let loaded = ThresholdStore::new(&path).load().unwrap().unwrap();
    assert_eq!(
        loaded.open_hand_threshold,
        Thresholds::default().open_hand_threshold
    );
    assert_eq!(loaded.swipe_threshold, 70.0);
}

#[test]
fn test_garbage_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calibration.json");
    fs::write(&path, "not json at all").unwrap();

    let err = ThresholdStore::new(&path).load().unwrap_err();
    assert!(format!("{err:#}").contains("Invalid threshold file"));
}
