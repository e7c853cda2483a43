//! Frame-by-frame gesture session.

use std::time::Duration;

use tracing::{debug, trace};

use crate::classifier::{ClassifierState, GestureClassifier, GestureConfig, HandStates};
use crate::domain::{Color, Frame, Gesture, HandPose, Handedness, Mode, Thresholds};

/// A gesture that passed the cooldown gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredGesture {
    /// Hand that performed it.
    pub hand: Handedness,
    /// The gesture.
    pub gesture: Gesture,
    /// Frame timestamp.
    pub timestamp: Duration,
}

impl FiredGesture {
    /// Feedback label.
    #[must_use]
    pub fn label(&self) -> String {
        self.gesture.label()
    }

    /// Feedback color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.gesture.color()
    }
}

/// Owns the classifier, the active thresholds and both per-side states.
#[derive(Debug, Clone)]
pub struct GestureSession {
    classifier: GestureClassifier,
    thresholds: Thresholds,
    states: HandStates,
    left_pose: Option<HandPose>,
    right_pose: Option<HandPose>,
    suppressed: usize,
}

impl GestureSession {
    /// Creates a session in media mode.
    #[must_use]
    pub fn new(config: GestureConfig, thresholds: Thresholds) -> Self {
        Self {
            classifier: GestureClassifier::new(config),
            thresholds,
            states: HandStates::default(),
            left_pose: None,
            right_pose: None,
            suppressed: 0,
        }
    }

    /// Starts the session in the given mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.states.set_mode(mode);
        self
    }

    /// Active thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Replaces the thresholds, e.g. after recalibration.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        debug!("Session thresholds updated: {thresholds:?}");
        self.thresholds = thresholds;
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.states.right.mode
    }

    /// Sets the mode on both sides.
    pub fn set_mode(&mut self, mode: Mode) {
        self.states.set_mode(mode);
    }

    /// Switches between media and keyboard mode, returning the new mode.
    pub fn toggle_mode(&mut self) -> Mode {
        let mode = self.mode().toggled();
        self.set_mode(mode);
        mode
    }

    /// State of one hand side.
    #[must_use]
    pub const fn state(&self, hand: Handedness) -> &ClassifierState {
        self.states.side(hand)
    }

    /// Pose of the last hand seen on `side`.
    #[must_use]
    pub const fn pose(&self, side: Handedness) -> Option<HandPose> {
        match side {
            Handedness::Left => self.left_pose,
            Handedness::Right => self.right_pose,
        }
    }

    /// Gestures held back by the cooldown so far.
    #[must_use]
    pub const fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    /// Classifies every hand in the frame and returns what fired.
    ///
    /// Hands without a resolved handedness are skipped and leave no trace.
    pub fn process_frame(&mut self, frame: &Frame) -> Vec<FiredGesture> {
        let mut fired = Vec::new();

        for hand in &frame.hands {
            let Some(side) = hand.handedness else {
                trace!("Skipping hand without handedness at {:?}", frame.timestamp);
                continue;
            };

            let state = self.states.side_mut(side);
            let out = self.classifier.classify(
                side,
                hand,
                frame.dimensions,
                *state,
                &self.thresholds,
                frame.timestamp,
            );
            *state = out.state;

            let pose = match side {
                Handedness::Left => &mut self.left_pose,
                Handedness::Right => &mut self.right_pose,
            };
            if *pose != Some(out.pose) {
                debug!("{side} hand pose: {:?}", out.pose);
                *pose = Some(out.pose);
            }

            if let Some(gesture) = out.suppressed {
                debug!("{side} hand: {} held back by cooldown", gesture.label());
                self.suppressed += 1;
            }
            if let Some(gesture) = out.gesture {
                debug!("{side} hand: {}", gesture.label());
                fired.push(FiredGesture {
                    hand: side,
                    gesture,
                    timestamp: frame.timestamp,
                });
            }
        }

        fired
    }
}
