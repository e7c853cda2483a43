//! User feedback port for overlays and terminal output.

use std::time::Duration;

use crate::calibration::CalibrationPhase;
use crate::domain::{Gesture, Handedness, Key, Mode, Thresholds};

/// Events emitted for on-screen or terminal feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    /// A calibration window has started.
    CalibrationPhaseStarted {
        /// Phase now sampling.
        phase: CalibrationPhase,
        /// Length of the window.
        window: Duration,
    },
    /// A calibration sample was collected.
    CalibrationSample {
        /// Phase the sample belongs to.
        phase: CalibrationPhase,
        /// Time elapsed in the current window.
        elapsed: Duration,
    },
    /// Calibration finished.
    CalibrationFinished {
        /// Resulting thresholds.
        thresholds: Thresholds,
    },
    /// A gesture passed the cooldown gate.
    GestureFired {
        /// Hand that performed it.
        hand: Handedness,
        /// The gesture.
        gesture: Gesture,
        /// Key sent for it, if any.
        key: Option<Key>,
    },
    /// The interaction mode changed.
    ModeChanged {
        /// New mode.
        mode: Mode,
    },
}

/// Port for receiving feedback events.
pub trait FeedbackSink: Send + Sync {
    /// Called when a feedback event occurs.
    fn on_event(&self, event: FeedbackEvent);
}

/// Feedback sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn on_event(&self, _event: FeedbackEvent) {}
}
