//! Per-frame gesture classification.
//!
//! Right hand in media mode: a sudden change of the pinch distance skips
//! forward or back, touching thumb and index toggles playback. Left hand:
//! thumb above or below the wrist and index base changes the volume. Right
//! hand in keyboard mode: a tap types the virtual key under the index tip.
//!
//! The right-hand pixel constants are fixed and independent of calibration.

mod keyboard;
mod state;

use std::time::Duration;

use tracing::{debug, trace};

pub use keyboard::{KeyCell, VirtualKeyboard, KEY_SIZE};
pub use state::{ClassifierState, HandStates};

use crate::domain::{
    FrameDimensions, Gesture, HandObservation, HandPose, Handedness, Mode, PixelPoint,
    Thresholds, VirtualKey,
};

/// Default minimum time between two gestures of the same hand.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(600);
/// Pinch distance change between frames that counts as next/previous, in pixels.
pub const PINCH_DELTA_PX: f64 = 40.0;
/// Pinch distance below which thumb and index count as touching, in pixels.
pub const TAP_DISTANCE_PX: f64 = 30.0;

/// Classifier tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum time between two gestures on the same hand side.
    pub cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

/// Outcome of classifying one hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Updated state for this hand side.
    pub state: ClassifierState,
    /// Gesture that fired, if any.
    pub gesture: Option<Gesture>,
    /// Gesture that matched but was held back by the cooldown.
    pub suppressed: Option<Gesture>,
    /// Thumb-index distance in pixels.
    pub pinch_distance: f64,
    /// Open/closed pose against the calibrated threshold.
    pub pose: HandPose,
}

/// Pixel positions of the landmarks the rules look at.
#[derive(Debug, Clone, Copy)]
struct KeyPoints {
    thumb: PixelPoint,
    index: PixelPoint,
    wrist: PixelPoint,
    index_base: PixelPoint,
}

impl KeyPoints {
    fn new(hand: &HandObservation, dimensions: FrameDimensions) -> Self {
        Self {
            thumb: hand.thumb_tip().to_pixel(dimensions),
            index: hand.index_tip().to_pixel(dimensions),
            wrist: hand.wrist().to_pixel(dimensions),
            index_base: hand.index_base().to_pixel(dimensions),
        }
    }
}

/// Stateless rule evaluator; per-side state is passed in and returned.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
    keyboard: VirtualKeyboard,
}

impl GestureClassifier {
    /// Creates a classifier with the given configuration.
    #[must_use]
    pub const fn new(config: GestureConfig) -> Self {
        Self {
            config,
            keyboard: VirtualKeyboard,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classifies one hand observation.
    ///
    /// `prev_distance` is always updated. `last_action` moves to `now` only
    /// when a gesture fires; a gesture inside the cooldown is reported as
    /// suppressed and leaves it untouched.
    #[must_use]
    pub fn classify(
        &self,
        handedness: Handedness,
        hand: &HandObservation,
        dimensions: FrameDimensions,
        state: ClassifierState,
        thresholds: &Thresholds,
        now: Duration,
    ) -> Classification {
        let points = KeyPoints::new(hand, dimensions);
        let pinch_distance = points.thumb.distance_to(&points.index);
        let pose = if hand.normalized_pinch_distance() > thresholds.open_hand_threshold {
            HandPose::Open
        } else {
            HandPose::Closed
        };

        let candidate = match (handedness, state.mode) {
            (Handedness::Right, Mode::Media) => media_gesture(pinch_distance, state.prev_distance),
            (Handedness::Right, Mode::Keyboard) => {
                self.keyboard_gesture(pinch_distance, points.index, state.emoji_mode)
            }
            (Handedness::Left, _) => volume_gesture(&points),
        };

        trace!(
            "{handedness} hand: pinch={pinch_distance:.1}px prev={:?} pose={pose:?} candidate={candidate:?}",
            state.prev_distance
        );

        let mut next = state;
        next.prev_distance = Some(pinch_distance);

        let (gesture, suppressed) = match candidate {
            Some(g) if state.in_cooldown(now, self.config.cooldown) => {
                debug!("{handedness} hand: {} suppressed by cooldown", g.name());
                (None, Some(g))
            }
            Some(g) => {
                next.last_action = Some(now);
                if g == Gesture::KeyTap(VirtualKey::EmojiToggle) {
                    next.emoji_mode = !next.emoji_mode;
                }
                (Some(g), None)
            }
            None => (None, None),
        };

        Classification {
            state: next,
            gesture,
            suppressed,
            pinch_distance,
            pose,
        }
    }

    fn keyboard_gesture(
        &self,
        pinch_distance: f64,
        index: PixelPoint,
        emoji_mode: bool,
    ) -> Option<Gesture> {
        if pinch_distance >= TAP_DISTANCE_PX {
            return None;
        }
        self.keyboard
            .key_at(index, emoji_mode)
            .map(Gesture::KeyTap)
    }
}

fn media_gesture(pinch_distance: f64, prev_distance: Option<f64>) -> Option<Gesture> {
    if let Some(prev) = prev_distance {
        let delta = pinch_distance - prev;
        if delta > PINCH_DELTA_PX {
            return Some(Gesture::Next);
        }
        if delta < -PINCH_DELTA_PX {
            return Some(Gesture::Previous);
        }
    }
    (pinch_distance < TAP_DISTANCE_PX).then_some(Gesture::PlayPause)
}

fn volume_gesture(points: &KeyPoints) -> Option<Gesture> {
    let thumb_y = points.thumb.y;
    let (wrist_y, index_base_y) = (points.wrist.y, points.index_base.y);

    if thumb_y < wrist_y && thumb_y < index_base_y {
        Some(Gesture::VolumeUp)
    } else if thumb_y > wrist_y && thumb_y > index_base_y {
        Some(Gesture::VolumeDown)
    } else {
        None
    }
}
