//! Terminal feedback using indicatif.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use handctl_core::ports::{FeedbackEvent, FeedbackSink};
use indicatif::{ProgressBar, ProgressStyle};

/// Feedback sink writing to stderr.
///
/// Calibration windows get a spinner when stderr is a terminal and a plain
/// line otherwise; fired gestures print their label.
pub struct TerminalFeedback {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
    show_spinner: bool,
}

impl TerminalFeedback {
    /// Creates a new terminal feedback sink.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_spinner` - If true, animate calibration windows
    #[must_use]
    pub const fn new(quiet: bool, show_spinner: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            quiet,
            show_spinner,
        }
    }

    fn start_spinner(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message);

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(bar);
        if let Some(old) = previous {
            old.finish_and_clear();
        }
    }

    fn finish_spinner(&self) {
        let bar = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }

    /// Prints a line without tearing an active spinner.
    fn println(&self, line: &str) {
        let guard = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

impl FeedbackSink for TerminalFeedback {
    fn on_event(&self, event: FeedbackEvent) {
        if self.quiet {
            return;
        }

        match event {
            FeedbackEvent::CalibrationPhaseStarted { phase, window } => {
                let message = format!(
                    "{} for {} seconds",
                    phase.instruction(),
                    window.as_secs_f64()
                );
                if self.show_spinner {
                    self.start_spinner(message);
                } else {
                    eprintln!("{message}");
                }
            }
            FeedbackEvent::CalibrationSample { phase, elapsed } => {
                let guard = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(bar) = guard.as_ref() {
                    bar.set_message(format!(
                        "{} ({:.1}s)",
                        phase.instruction(),
                        elapsed.as_secs_f64()
                    ));
                }
            }
            FeedbackEvent::CalibrationFinished { thresholds } => {
                self.finish_spinner();
                eprintln!(
                    "Calibration complete: open_hand_threshold={:.3}, swipe_threshold={:.1}",
                    thresholds.open_hand_threshold, thresholds.swipe_threshold
                );
            }
            FeedbackEvent::GestureFired { hand, gesture, key } => {
                let line = match key {
                    Some(key) => format!("{} [{hand}] -> {key}", gesture.label()),
                    None => format!("{} [{hand}]", gesture.label()),
                };
                self.println(&line);
            }
            FeedbackEvent::ModeChanged { mode } => {
                self.println(&format!("Mode: {}", mode.as_str().to_uppercase()));
            }
        }
    }
}
