//! Hand landmark and frame types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of landmarks reported per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices, following the MediaPipe hand model numbering.
#[allow(dead_code, missing_docs)]
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (0.0 to 1.0 of frame width).
    pub x: f64,
    /// Vertical position (0.0 to 1.0 of frame height, growing downwards).
    pub y: f64,
    /// Detector visibility estimate, when the tracker reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Creates a landmark without a visibility estimate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: None,
        }
    }

    /// Scales the landmark to whole pixel coordinates.
    ///
    /// Fractional pixels are truncated toward zero.
    #[must_use]
    pub fn to_pixel(&self, dimensions: FrameDimensions) -> PixelPoint {
        PixelPoint {
            x: (self.x * f64::from(dimensions.width)).trunc(),
            y: (self.y * f64::from(dimensions.height)).trunc(),
        }
    }

    /// Euclidean distance to another landmark in normalized units.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelPoint {
    /// Horizontal pixel position.
    pub x: f64,
    /// Vertical pixel position.
    pub y: f64,
}

impl PixelPoint {
    /// Creates a new pixel point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in pixels.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameDimensions {
    /// Width assumed when a source does not report one.
    pub const DEFAULT_WIDTH: u32 = 640;
    /// Height assumed when a source does not report one.
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Creates new frame dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameDimensions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Which hand a detection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// The user's left hand.
    Left,
    /// The user's right hand.
    Right,
}

impl Handedness {
    /// Lowercase name for logs and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown handedness '{other}'")),
        }
    }
}

/// One detected hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    /// Handedness label, `None` when the detector could not resolve it.
    pub handedness: Option<Handedness>,
    /// All 21 landmarks in anatomical order.
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandObservation {
    /// Creates an observation from a full landmark set.
    #[must_use]
    pub const fn new(
        handedness: Option<Handedness>,
        landmarks: [Landmark; LANDMARK_COUNT],
    ) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    /// Builds an observation from a slice, returning `None` unless it holds
    /// exactly 21 landmarks.
    #[must_use]
    pub fn from_slice(handedness: Option<Handedness>, landmarks: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().ok()?;
        Some(Self::new(handedness, landmarks))
    }

    /// Returns the landmark at `index` (see [`landmarks`]).
    #[must_use]
    pub fn landmark(&self, index: usize) -> Option<Landmark> {
        self.landmarks.get(index).copied()
    }

    /// Thumb tip landmark.
    #[must_use]
    pub const fn thumb_tip(&self) -> Landmark {
        self.landmarks[landmarks::THUMB_TIP]
    }

    /// Index finger tip landmark.
    #[must_use]
    pub const fn index_tip(&self) -> Landmark {
        self.landmarks[landmarks::INDEX_FINGER_TIP]
    }

    /// Wrist landmark.
    #[must_use]
    pub const fn wrist(&self) -> Landmark {
        self.landmarks[landmarks::WRIST]
    }

    /// Index finger base (MCP joint) landmark.
    #[must_use]
    pub const fn index_base(&self) -> Landmark {
        self.landmarks[landmarks::INDEX_FINGER_MCP]
    }

    /// Thumb-tip to index-tip distance in normalized units.
    #[must_use]
    pub fn normalized_pinch_distance(&self) -> f64 {
        self.thumb_tip().distance_to(&self.index_tip())
    }
}

/// Everything the landmark source reports for one video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Monotonic capture time since the stream started.
    pub timestamp: Duration,
    /// Frame size in pixels.
    pub dimensions: FrameDimensions,
    /// Hands detected in this frame, possibly none.
    pub hands: Vec<HandObservation>,
    /// Interactive key pressed in the tracker window during this frame.
    pub pressed_key: Option<char>,
}

impl Frame {
    /// Creates a frame with no pressed key.
    #[must_use]
    pub const fn new(
        timestamp: Duration,
        dimensions: FrameDimensions,
        hands: Vec<HandObservation>,
    ) -> Self {
        Self {
            timestamp,
            dimensions,
            hands,
            pressed_key: None,
        }
    }

    /// First detected hand, regardless of handedness.
    #[must_use]
    pub fn first_hand(&self) -> Option<&HandObservation> {
        self.hands.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel_truncates() {
        let lm = Landmark::new(0.5, 0.25);
        let px = lm.to_pixel(FrameDimensions::new(101, 99));
        assert!((px.x - 50.0).abs() < f64::EPSILON);
        assert!((px.y - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pixel_distance() {
        let a = PixelPoint::new(0.0, 0.0);
        let b = PixelPoint::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handedness_parse() {
        assert_eq!("Left".parse::<Handedness>(), Ok(Handedness::Left));
        assert_eq!(" right ".parse::<Handedness>(), Ok(Handedness::Right));
        assert!("both".parse::<Handedness>().is_err());
    }

    #[test]
    fn test_from_slice_requires_21_landmarks() {
        let short = vec![Landmark::default(); 20];
        assert!(HandObservation::from_slice(Some(Handedness::Left), &short).is_none());

        let full = vec![Landmark::default(); LANDMARK_COUNT];
        let hand = HandObservation::from_slice(Some(Handedness::Left), &full);
        assert!(hand.is_some());
    }

    #[test]
    fn test_landmark_lookup_is_bounded() {
        let mut lms = [Landmark::default(); LANDMARK_COUNT];
        lms[landmarks::WRIST] = Landmark::new(0.25, 0.75);
        let hand = HandObservation::new(None, lms);
        assert_eq!(hand.landmark(landmarks::WRIST), Some(Landmark::new(0.25, 0.75)));
        assert_eq!(hand.landmark(LANDMARK_COUNT), None);
    }

    #[test]
    fn test_normalized_pinch_distance() {
        let mut lms = [Landmark::default(); LANDMARK_COUNT];
        lms[landmarks::THUMB_TIP] = Landmark::new(0.1, 0.1);
        lms[landmarks::INDEX_FINGER_TIP] = Landmark::new(0.4, 0.5);
        let hand = HandObservation::new(None, lms);
        assert!((hand.normalized_pinch_distance() - 0.5).abs() < 1e-12);
    }
}
