//! Synthetic hand and frame builders for testing.

use std::time::Duration;

use handctl_core::domain::{
    landmarks, Frame, FrameDimensions, HandObservation, Handedness, Landmark, LANDMARK_COUNT,
};

/// Frame size used by the builders.
///
/// A power of two keeps pixel positions exact after the round trip through
/// normalized coordinates.
pub const TEST_DIMENSIONS: FrameDimensions = FrameDimensions::new(512, 512);

/// Builder for synthetic hand observations, positioned in pixels.
///
/// Every landmark starts at the frame center; the builder methods move the
/// four landmarks the gesture rules look at.
#[derive(Debug, Clone)]
pub struct HandBuilder {
    handedness: Option<Handedness>,
    dimensions: FrameDimensions,
    points: [(f64, f64); LANDMARK_COUNT],
}

impl HandBuilder {
    /// Creates a hand with the given label.
    #[must_use]
    pub fn new(handedness: Option<Handedness>) -> Self {
        let center = (
            f64::from(TEST_DIMENSIONS.width) / 2.0,
            f64::from(TEST_DIMENSIONS.height) / 2.0,
        );
        Self {
            handedness,
            dimensions: TEST_DIMENSIONS,
            points: [center; LANDMARK_COUNT],
        }
    }

    /// Creates a right hand.
    #[must_use]
    pub fn right() -> Self {
        Self::new(Some(Handedness::Right))
    }

    /// Creates a left hand.
    #[must_use]
    pub fn left() -> Self {
        Self::new(Some(Handedness::Left))
    }

    /// Creates a hand the tracker could not label.
    #[must_use]
    pub fn unresolved() -> Self {
        Self::new(None)
    }

    // === Presets ===

    /// Right hand with thumb and index tips `distance` pixels apart.
    #[must_use]
    pub fn pinch(distance: f64) -> Self {
        Self::right()
            .thumb(100.0, 300.0)
            .index(100.0 + distance, 300.0)
            .wrist(200.0, 450.0)
            .index_base(200.0, 350.0)
    }

    /// Right hand with spread fingers (normalized pinch well above 0.2).
    #[must_use]
    pub fn open_hand() -> Self {
        Self::pinch(200.0)
    }

    /// Right hand making a fist (normalized pinch well below 0.2).
    #[must_use]
    pub fn fist() -> Self {
        Self::pinch(20.0)
    }

    /// Left hand with the thumb above wrist and index base.
    #[must_use]
    pub fn thumbs_up() -> Self {
        Self::left()
            .thumb(300.0, 50.0)
            .index(330.0, 200.0)
            .wrist(300.0, 120.0)
            .index_base(300.0, 110.0)
    }

    /// Left hand with the thumb below wrist and index base.
    #[must_use]
    pub fn thumbs_down() -> Self {
        Self::left()
            .thumb(300.0, 150.0)
            .index(330.0, 200.0)
            .wrist(300.0, 100.0)
            .index_base(300.0, 90.0)
    }

    /// Left hand with the thumb between wrist and index base.
    #[must_use]
    pub fn thumb_level() -> Self {
        Self::left()
            .thumb(300.0, 100.0)
            .index(330.0, 200.0)
            .wrist(300.0, 120.0)
            .index_base(300.0, 90.0)
    }

    // === Setters ===

    /// Overrides the handedness label.
    #[must_use]
    pub const fn handedness(mut self, handedness: Option<Handedness>) -> Self {
        self.handedness = handedness;
        self
    }

    /// Sets the frame size used to normalize pixel positions.
    #[must_use]
    pub const fn dimensions(mut self, dimensions: FrameDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Places any landmark, in pixels.
    #[must_use]
    pub fn landmark(mut self, index: usize, x: f64, y: f64) -> Self {
        self.points[index] = (x, y);
        self
    }

    /// Places the thumb tip.
    #[must_use]
    pub fn thumb(self, x: f64, y: f64) -> Self {
        self.landmark(landmarks::THUMB_TIP, x, y)
    }

    /// Places the index finger tip.
    #[must_use]
    pub fn index(self, x: f64, y: f64) -> Self {
        self.landmark(landmarks::INDEX_FINGER_TIP, x, y)
    }

    /// Places the wrist.
    #[must_use]
    pub fn wrist(self, x: f64, y: f64) -> Self {
        self.landmark(landmarks::WRIST, x, y)
    }

    /// Places the index finger base.
    #[must_use]
    pub fn index_base(self, x: f64, y: f64) -> Self {
        self.landmark(landmarks::INDEX_FINGER_MCP, x, y)
    }

    /// Shifts every landmark horizontally.
    #[must_use]
    pub fn shifted_x(mut self, dx: f64) -> Self {
        for point in &mut self.points {
            point.0 += dx;
        }
        self
    }

    /// Builds the observation in normalized coordinates.
    #[must_use]
    pub fn build(&self) -> HandObservation {
        let (w, h) = (
            f64::from(self.dimensions.width),
            f64::from(self.dimensions.height),
        );
        let landmarks = self.points.map(|(x, y)| Landmark::new(x / w, y / h));
        HandObservation::new(self.handedness, landmarks)
    }
}

/// Builder for synthetic frames.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    /// Starts a frame at the given timestamp with no hands.
    #[must_use]
    pub const fn at(timestamp: Duration) -> Self {
        Self {
            frame: Frame::new(timestamp, TEST_DIMENSIONS, Vec::new()),
        }
    }

    /// Starts a frame at the given millisecond timestamp.
    #[must_use]
    pub const fn at_millis(ms: u64) -> Self {
        Self::at(Duration::from_millis(ms))
    }

    /// Sets the frame size.
    #[must_use]
    pub fn dimensions(mut self, dimensions: FrameDimensions) -> Self {
        self.frame.dimensions = dimensions;
        self
    }

    /// Adds a hand.
    #[must_use]
    pub fn hand(mut self, hand: HandObservation) -> Self {
        self.frame.hands.push(hand);
        self
    }

    /// Records a key pressed in the preview window.
    #[must_use]
    pub fn key(mut self, key: char) -> Self {
        self.frame.pressed_key = Some(key);
        self
    }

    /// Builds the frame.
    #[must_use]
    pub fn build(self) -> Frame {
        self.frame
    }

    /// Builds `count` frames `step` apart starting at `start`, each holding
    /// the same hand.
    #[must_use]
    pub fn repeated(
        start: Duration,
        step: Duration,
        count: u32,
        hand: &HandObservation,
    ) -> Vec<Frame> {
        (0..count)
            .map(|i| Self::at(start + step * i).hand(hand.clone()).build())
            .collect()
    }
}
