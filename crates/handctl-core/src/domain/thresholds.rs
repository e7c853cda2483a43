//! Calibrated decision thresholds.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default open/closed boundary on the normalized pinch distance.
pub const DEFAULT_OPEN_HAND_THRESHOLD: f64 = 0.2;
/// Default mean horizontal index-tip displacement per frame, in pixels.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// Invalid threshold value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// Value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Value is below zero.
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Thresholds derived by calibration and persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Boundary between open and closed hand on the normalized pinch distance.
    #[serde(default = "default_open_hand_threshold")]
    pub open_hand_threshold: f64,
    /// Swipe sensitivity in pixels per frame.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
}

const fn default_open_hand_threshold() -> f64 {
    DEFAULT_OPEN_HAND_THRESHOLD
}

const fn default_swipe_threshold() -> f64 {
    DEFAULT_SWIPE_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            open_hand_threshold: DEFAULT_OPEN_HAND_THRESHOLD,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is negative or not finite.
    pub fn new(open_hand_threshold: f64, swipe_threshold: f64) -> Result<Self, ThresholdError> {
        let thresholds = Self {
            open_hand_threshold,
            swipe_threshold,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks both values are non-negative finite numbers.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        check("open_hand_threshold", self.open_hand_threshold)?;
        check("swipe_threshold", self.swipe_threshold)
    }

    /// Replaces every invalid field with its default, logging a warning per field.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let open_hand_threshold = check("open_hand_threshold", self.open_hand_threshold)
            .map_or_else(
                |e| {
                    warn!("{e}; using default {DEFAULT_OPEN_HAND_THRESHOLD}");
                    DEFAULT_OPEN_HAND_THRESHOLD
                },
                |()| self.open_hand_threshold,
            );
        let swipe_threshold = check("swipe_threshold", self.swipe_threshold).map_or_else(
            |e| {
                warn!("{e}; using default {DEFAULT_SWIPE_THRESHOLD}");
                DEFAULT_SWIPE_THRESHOLD
            },
            |()| self.swipe_threshold,
        );
        Self {
            open_hand_threshold,
            swipe_threshold,
        }
    }
}

fn check(field: &'static str, value: f64) -> Result<(), ThresholdError> {
    if !value.is_finite() {
        return Err(ThresholdError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(ThresholdError::Negative { field, value });
    }
    Ok(())
}
