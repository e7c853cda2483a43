//! Per-hand classifier state carried across frames.

use std::time::Duration;

use crate::domain::{Handedness, Mode};

/// State for one hand side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierState {
    /// Pinch distance seen on the previous observation of this side, in pixels.
    pub prev_distance: Option<f64>,
    /// Timestamp of the last gesture that fired on this side.
    pub last_action: Option<Duration>,
    /// Current interaction mode.
    pub mode: Mode,
    /// Whether the virtual keyboard shows the emoji layout.
    pub emoji_mode: bool,
}

impl ClassifierState {
    /// Creates a fresh state in the given mode.
    #[must_use]
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Whether a gesture at `now` falls inside the cooldown of the last one.
    #[must_use]
    pub fn in_cooldown(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_action
            .is_some_and(|last| now.saturating_sub(last) <= cooldown)
    }
}

/// Classifier state for both hand sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandStates {
    /// Left hand state.
    pub left: ClassifierState,
    /// Right hand state.
    pub right: ClassifierState,
}

impl HandStates {
    /// Creates fresh states for both sides in the given mode.
    #[must_use]
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            left: ClassifierState::with_mode(mode),
            right: ClassifierState::with_mode(mode),
        }
    }

    /// State of one side.
    #[must_use]
    pub const fn side(&self, hand: Handedness) -> &ClassifierState {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    /// Mutable state of one side.
    pub fn side_mut(&mut self, hand: Handedness) -> &mut ClassifierState {
        match hand {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    /// Sets the mode on both sides.
    pub fn set_mode(&mut self, mode: Mode) {
        self.left.mode = mode;
        self.right.mode = mode;
    }
}
