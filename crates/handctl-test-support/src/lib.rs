//! Test support utilities for handctl.
//!
//! Provides mocks of the core ports and builders for synthetic hands and
//! frames, so the calibrator, classifier and session can be driven without
//! a camera.
//!
//! # Example
//!
//! ```
//! use handctl_test_support::{FrameBuilder, HandBuilder, MockObservationSource};
//!
//! // A right hand pinching, then a left thumbs-up half a second later
//! let frames = vec![
//!     FrameBuilder::at_millis(0).hand(HandBuilder::pinch(10.0).build()).build(),
//!     FrameBuilder::at_millis(500).hand(HandBuilder::thumbs_up().build()).build(),
//! ];
//!
//! let source = MockObservationSource::new(frames);
//! assert_eq!(source.remaining(), 2);
//! ```

mod builders;
mod mocks;

pub use builders::{FrameBuilder, HandBuilder, TEST_DIMENSIONS};
pub use mocks::{MockFeedbackSink, MockKeySink, MockObservationSource};
