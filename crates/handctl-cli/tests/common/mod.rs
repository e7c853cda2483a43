//! Shared helpers for CLI integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use assert_cmd::Command;
use handctl_adapters::{write_frame, ThresholdStore};
use handctl_core::domain::{Frame, Thresholds};
use handctl_test_support::{FrameBuilder, HandBuilder};

/// Calibration windows short enough for replay tests.
pub const SHORT_CALIBRATION: &str = r"
[calibration]
open_window_secs = 0.5
closed_window_secs = 0.5
swipe_window_secs = 0.5
";

/// Open threshold produced by [`calibration_frames`].
pub const EXPECTED_OPEN_THRESHOLD: f64 = (200.0 / 512.0 + 20.0 / 512.0) / 2.0;

/// `handctl` running in `dir` with an isolated XDG config directory.
pub fn handctl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("handctl").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir);
    cmd
}

/// Writes frames as a replayable landmark stream.
pub fn write_replay(path: &Path, frames: &[Frame]) {
    let mut writer = BufWriter::new(File::create(path).unwrap());
    for frame in frames {
        write_frame(&mut writer, frame).unwrap();
    }
}

/// Stores thresholds so `run` skips calibration.
pub fn write_thresholds(path: &Path) {
    ThresholdStore::new(path)
        .save(&Thresholds::default())
        .unwrap();
}

/// A full pass over [`SHORT_CALIBRATION`] windows starting at 0 ms:
/// open hand, fist, then 30 px swipes, closed by an empty frame at 1.5 s.
pub fn calibration_frames() -> Vec<Frame> {
    let mut frames = Vec::new();
    for i in 0..5u64 {
        frames.push(
            FrameBuilder::at_millis(i * 100)
                .hand(HandBuilder::open_hand().build())
                .build(),
        );
    }
    for i in 5..10u64 {
        frames.push(
            FrameBuilder::at_millis(i * 100)
                .hand(HandBuilder::fist().build())
                .build(),
        );
    }
    for i in 10..15u64 {
        let dx = if i % 2 == 0 { 0.0 } else { 30.0 };
        let hand = HandBuilder::pinch(50.0).shifted_x(dx).build();
        frames.push(FrameBuilder::at_millis(i * 100).hand(hand).build());
    }
    frames.push(FrameBuilder::at_millis(1_500).build());
    frames
}

/// Right pinch at `ms` with the given tip distance.
pub fn pinch_at(ms: u64, distance: f64) -> Frame {
    FrameBuilder::at_millis(ms)
        .hand(HandBuilder::pinch(distance).build())
        .build()
}

/// Key names from the JSON key output.
pub fn keys_from_stdout(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["key"].as_str().unwrap().to_string()
        })
        .collect()
}
