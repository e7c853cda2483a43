//! handctl core - gesture recognition and calibration
//!
//! This crate contains the domain types, the port traits, the calibrator,
//! the per-frame gesture classifier, the gesture session and the action
//! dispatcher. Camera access and key injection live behind the ports.

pub mod calibration;
pub mod classifier;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod session;

pub use calibration::{CalibrationConfig, CalibrationOutcome, CalibrationPhase, Calibrator};
pub use classifier::{Classification, GestureClassifier, GestureConfig};
pub use dispatch::{key_for, ActionDispatcher};
pub use domain::{
    Frame, FrameDimensions, Gesture, HandObservation, Handedness, Key, Landmark, Mode,
    Thresholds,
};
pub use ports::{FeedbackEvent, FeedbackSink, HandObservationSource, KeySink, SourceError};
pub use session::{FiredGesture, GestureSession};
