//! Mock implementations of core port traits.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use handctl_core::domain::{Frame, Key};
use handctl_core::ports::{
    FeedbackEvent, FeedbackSink, HandObservationSource, KeySink, SourceError,
};

/// Mock implementation of `HandObservationSource` for testing.
///
/// Yields scripted frames and errors in order, then reports end of stream.
pub struct MockObservationSource {
    script: VecDeque<Result<Frame, SourceError>>,
    read_count: Arc<Mutex<usize>>,
}

impl MockObservationSource {
    /// Creates a new mock source yielding the given frames.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self::scripted(frames.into_iter().map(Ok).collect())
    }

    /// Creates a mock source from a script of frames and errors.
    #[must_use]
    pub fn scripted(script: Vec<Result<Frame, SourceError>>) -> Self {
        Self {
            script: script.into(),
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of `next_frame()` calls so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        *self
            .read_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of scripted entries not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl HandObservationSource for MockObservationSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        if let Ok(mut c) = self.read_count.lock() {
            *c += 1;
        }
        self.script.pop_front().transpose()
    }
}

/// Mock implementation of `KeySink` for testing.
///
/// Captures every key it is asked to press.
pub struct MockKeySink {
    pressed: Arc<Mutex<Vec<Key>>>,
    fail: bool,
}

impl MockKeySink {
    /// Creates a new mock sink that accepts every key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pressed: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Creates a mock sink that records keys but fails every press.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Returns all keys pressed so far.
    #[must_use]
    pub fn pressed(&self) -> Vec<Key> {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockKeySink {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySink for MockKeySink {
    fn press(&self, key: &Key) -> anyhow::Result<()> {
        self.pressed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.clone());
        if self.fail {
            anyhow::bail!("mock key sink refused {key}");
        }
        Ok(())
    }
}

/// Mock implementation of `FeedbackSink` for testing.
///
/// Captures events for later assertions.
pub struct MockFeedbackSink {
    events: Arc<Mutex<Vec<FeedbackEvent>>>,
}

impl MockFeedbackSink {
    /// Creates a new mock feedback sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `CalibrationPhaseStarted` events.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::CalibrationPhaseStarted { .. }))
            .count()
    }

    /// Returns the number of `CalibrationSample` events.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::CalibrationSample { .. }))
            .count()
    }

    /// Returns the number of `GestureFired` events.
    #[must_use]
    pub fn fired_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FeedbackEvent::GestureFired { .. }))
            .count()
    }

    /// Returns whether a `CalibrationFinished` event was received.
    #[must_use]
    pub fn has_finished_calibration(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, FeedbackEvent::CalibrationFinished { .. }))
    }
}

impl Default for MockFeedbackSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSink for MockFeedbackSink {
    fn on_event(&self, event: FeedbackEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
