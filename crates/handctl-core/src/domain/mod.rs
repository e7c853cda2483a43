//! Core domain types for gesture control.

mod gesture;
mod landmark;
mod thresholds;

pub use gesture::{Color, Gesture, HandPose, Key, Mode, VirtualKey};
pub use landmark::{
    landmarks, Frame, FrameDimensions, HandObservation, Handedness, Landmark, PixelPoint,
    LANDMARK_COUNT,
};
pub use thresholds::{
    ThresholdError, Thresholds, DEFAULT_OPEN_HAND_THRESHOLD, DEFAULT_SWIPE_THRESHOLD,
};
