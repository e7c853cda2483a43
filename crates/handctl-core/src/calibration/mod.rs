//! Threshold calibration from live samples.

mod samples;
mod session;

pub use samples::{mean, CalibrationSamples};
pub use session::{CalibrationConfig, CalibrationOutcome, CalibrationPhase, Calibrator};
