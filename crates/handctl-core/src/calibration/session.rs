//! Interactive calibration session.
//!
//! Samples the pinch distance of an open and a closed hand over two
//! consecutive windows, then the index-tip motion of a swipe over a third
//! window, and turns the samples into [`Thresholds`].

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::CalibrationSamples;
use crate::domain::{Frame, Thresholds};
use crate::ports::{FeedbackEvent, FeedbackSink, HandObservationSource, SourceError};

/// Calibration step currently sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// Fingers spread.
    OpenHand,
    /// Fist.
    ClosedHand,
    /// Horizontal swipes.
    Swipe,
}

impl CalibrationPhase {
    /// Instruction shown to the user for this phase.
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::OpenHand => "Show an OPEN hand (fingers spread)",
            Self::ClosedHand => "Show a CLOSED hand (fist)",
            Self::Swipe => "Swipe left/right slowly",
        }
    }
}

impl fmt::Display for CalibrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenHand => "open hand",
            Self::ClosedHand => "closed hand",
            Self::Swipe => "swipe",
        })
    }
}

/// Calibration window lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationConfig {
    /// Open-hand sampling window.
    pub open_window: Duration,
    /// Closed-hand sampling window, following the open one.
    pub closed_window: Duration,
    /// Swipe sampling window.
    pub swipe_window: Duration,
    /// Key that ends the current window early.
    pub quit_key: char,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            open_window: Duration::from_secs(3),
            closed_window: Duration::from_secs(3),
            swipe_window: Duration::from_secs(5),
            quit_key: 'q',
        }
    }
}

/// Result of a calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationOutcome {
    /// Derived thresholds.
    pub thresholds: Thresholds,
    /// Samples they were derived from.
    pub samples: CalibrationSamples,
    /// Whether every window ran before the stream ended.
    pub complete: bool,
}

/// How a sampling window ended.
enum WindowEnd {
    /// Window elapsed; the first frame past it is handed to the next window.
    Elapsed(Frame),
    /// The user pressed the quit key.
    Quit,
    /// The source ran out of frames.
    StreamEnded,
}

/// Runs calibration sessions against a landmark source.
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    /// Creates a calibrator with the given windows.
    #[must_use]
    pub const fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Returns the configured windows.
    #[must_use]
    pub const fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Runs a full calibration pass.
    ///
    /// Thresholds without enough samples keep their `previous` value. The
    /// caller is responsible for persisting the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the source becomes unavailable. Bad frames are
    /// skipped.
    pub fn calibrate<S>(
        &self,
        source: &mut S,
        feedback: &dyn FeedbackSink,
        previous: Thresholds,
    ) -> Result<CalibrationOutcome, SourceError>
    where
        S: HandObservationSource + ?Sized,
    {
        info!("=== CALIBRATION MODE ===");
        let mut samples = CalibrationSamples::default();

        let carried = match self.sample_hand_state(source, feedback, &mut samples)? {
            WindowEnd::Elapsed(frame) => Some(frame),
            WindowEnd::Quit => None,
            WindowEnd::StreamEnded => {
                warn!("Landmark stream ended during hand-state calibration");
                return Ok(Self::finish(samples, feedback, previous, false));
            }
        };

        if let Some(open) = samples.open_hand_threshold() {
            info!("Set open_hand_threshold = {open:.3}");
        }

        let complete = match self.sample_swipe(source, feedback, carried, &mut samples)? {
            WindowEnd::StreamEnded => {
                warn!("Landmark stream ended during swipe calibration");
                false
            }
            WindowEnd::Elapsed(frame) => {
                debug!("Dropping frame at {:?} past the swipe window", frame.timestamp);
                true
            }
            WindowEnd::Quit => true,
        };

        if let Some(swipe) = samples.swipe_threshold() {
            info!("Set swipe_threshold = {swipe:.1} pixels");
        }

        Ok(Self::finish(samples, feedback, previous, complete))
    }

    fn finish(
        samples: CalibrationSamples,
        feedback: &dyn FeedbackSink,
        previous: Thresholds,
        complete: bool,
    ) -> CalibrationOutcome {
        let thresholds = samples.thresholds(previous);
        debug!(
            "Calibration used {} open, {} closed, {} swipe samples",
            samples.open.len(),
            samples.closed.len(),
            samples.swipe.len()
        );
        feedback.on_event(FeedbackEvent::CalibrationFinished { thresholds });
        CalibrationOutcome {
            thresholds,
            samples,
            complete,
        }
    }

    /// Open and closed windows, back to back, timed from the first frame.
    fn sample_hand_state<S>(
        &self,
        source: &mut S,
        feedback: &dyn FeedbackSink,
        samples: &mut CalibrationSamples,
    ) -> Result<WindowEnd, SourceError>
    where
        S: HandObservationSource + ?Sized,
    {
        let hand_window = self.config.open_window + self.config.closed_window;
        let mut phase = CalibrationPhase::OpenHand;
        self.announce(feedback, phase);

        let mut start = None;
        while let Some(frame) = next_usable_frame(source)? {
            let started = *start.get_or_insert(frame.timestamp);
            let elapsed = frame.timestamp.saturating_sub(started);
            if elapsed >= hand_window {
                return Ok(WindowEnd::Elapsed(frame));
            }

            if elapsed >= self.config.open_window && phase == CalibrationPhase::OpenHand {
                phase = CalibrationPhase::ClosedHand;
                self.announce(feedback, phase);
            }

            if let Some(hand) = frame.first_hand() {
                let distance = hand.normalized_pinch_distance();
                match phase {
                    CalibrationPhase::OpenHand => samples.open.push(distance),
                    _ => samples.closed.push(distance),
                }
                feedback.on_event(FeedbackEvent::CalibrationSample { phase, elapsed });
            }

            if frame.pressed_key == Some(self.config.quit_key) {
                info!("Hand-state calibration stopped by user");
                return Ok(WindowEnd::Quit);
            }
        }

        Ok(WindowEnd::StreamEnded)
    }

    /// Swipe window, timed from its own first frame.
    fn sample_swipe<S>(
        &self,
        source: &mut S,
        feedback: &dyn FeedbackSink,
        carried: Option<Frame>,
        samples: &mut CalibrationSamples,
    ) -> Result<WindowEnd, SourceError>
    where
        S: HandObservationSource + ?Sized,
    {
        let phase = CalibrationPhase::Swipe;
        self.announce(feedback, phase);

        let mut pending = carried;
        let mut start = None;
        let mut prev_x: Option<f64> = None;

        loop {
            let frame = match pending.take() {
                Some(frame) => frame,
                None => match next_usable_frame(source)? {
                    Some(frame) => frame,
                    None => return Ok(WindowEnd::StreamEnded),
                },
            };

            let started = *start.get_or_insert(frame.timestamp);
            let elapsed = frame.timestamp.saturating_sub(started);
            if elapsed >= self.config.swipe_window {
                return Ok(WindowEnd::Elapsed(frame));
            }

            if let Some(hand) = frame.first_hand() {
                let x = hand.index_tip().x * f64::from(frame.dimensions.width);
                if let Some(prev) = prev_x {
                    samples.swipe.push((x - prev).abs());
                }
                prev_x = Some(x);
                feedback.on_event(FeedbackEvent::CalibrationSample { phase, elapsed });
            }

            if frame.pressed_key == Some(self.config.quit_key) {
                info!("Swipe calibration stopped by user");
                return Ok(WindowEnd::Quit);
            }
        }
    }

    fn announce(&self, feedback: &dyn FeedbackSink, phase: CalibrationPhase) {
        let window = match phase {
            CalibrationPhase::OpenHand => self.config.open_window,
            CalibrationPhase::ClosedHand => self.config.closed_window,
            CalibrationPhase::Swipe => self.config.swipe_window,
        };
        info!("{} for {} seconds", phase.instruction(), window.as_secs_f64());
        feedback.on_event(FeedbackEvent::CalibrationPhaseStarted { phase, window });
    }
}

/// Reads the next frame, skipping frames that failed to decode.
fn next_usable_frame<S>(source: &mut S) -> Result<Option<Frame>, SourceError>
where
    S: HandObservationSource + ?Sized,
{
    loop {
        match source.next_frame() {
            Err(e) if e.is_recoverable() => warn!("Skipping frame: {e}"),
            other => return other,
        }
    }
}
