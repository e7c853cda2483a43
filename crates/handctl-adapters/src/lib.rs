//! handctl adapters - I/O around the gesture core.
//!
//! This crate provides adapters for:
//! - Threshold file persistence
//! - JSON-lines landmark streams (recordings, stdin, tracker process)
//! - Key injection

pub mod keys;
pub mod store;
pub mod stream;
pub mod tracker;

#[cfg(feature = "enigo")]
pub use keys::EnigoKeySink;
pub use keys::CommandKeySink;
pub use store::{ThresholdStore, DEFAULT_THRESHOLDS_FILE};
pub use stream::{write_frame, JsonLinesSource, RecordingSource};
pub use tracker::TrackerProcess;
