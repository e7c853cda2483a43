//! Landmark source port.

use thiserror::Error;

use crate::domain::Frame;

/// Failure reported by a landmark source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The capture device or tracker cannot be opened or has died.
    #[error("landmark source unavailable: {0}")]
    Unavailable(String),
    /// A single frame could not be read or decoded.
    #[error("failed to read frame: {0}")]
    FrameRead(String),
}

impl SourceError {
    /// Whether the caller may skip this tick and keep reading.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FrameRead(_))
    }
}

/// Port for pulling hand observations frame by frame.
///
/// The implementation owns the capture device and the hand-landmark model;
/// callers only see decoded frames.
pub trait HandObservationSource {
    /// Blocks until the next frame is available.
    ///
    /// Returns `Ok(None)` once the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FrameRead`] for a bad frame (the stream remains
    /// usable) and [`SourceError::Unavailable`] when no further frames can be read.
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}

impl<S: HandObservationSource + ?Sized> HandObservationSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        (**self).next_frame()
    }
}
