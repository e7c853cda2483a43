//! Sample sets collected during calibration and the thresholds they imply.

use tracing::info;

use crate::domain::Thresholds;

/// Arithmetic mean, `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Raw measurements gathered by a calibration session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSamples {
    /// Normalized pinch distances while the hand was shown open.
    pub open: Vec<f64>,
    /// Normalized pinch distances while the hand was shown closed.
    pub closed: Vec<f64>,
    /// Absolute frame-to-frame index-tip displacements in pixels.
    pub swipe: Vec<f64>,
}

impl CalibrationSamples {
    /// Midpoint between the open and closed cluster means.
    ///
    /// `None` unless both sample sets are non-empty.
    #[must_use]
    pub fn open_hand_threshold(&self) -> Option<f64> {
        Some((mean(&self.open)? + mean(&self.closed)?) / 2.0)
    }

    /// Mean swipe displacement, `None` without samples.
    #[must_use]
    pub fn swipe_threshold(&self) -> Option<f64> {
        mean(&self.swipe)
    }

    /// Derives thresholds, keeping `previous` values where data is missing.
    #[must_use]
    pub fn thresholds(&self, previous: Thresholds) -> Thresholds {
        let open_hand_threshold = self.open_hand_threshold().unwrap_or_else(|| {
            info!(
                "Not enough open/closed samples ({} open, {} closed), keeping open_hand_threshold = {:.3}",
                self.open.len(),
                self.closed.len(),
                previous.open_hand_threshold
            );
            previous.open_hand_threshold
        });
        let swipe_threshold = self.swipe_threshold().unwrap_or_else(|| {
            info!(
                "No swipe samples, keeping swipe_threshold = {:.1}",
                previous.swipe_threshold
            );
            previous.swipe_threshold
        });

        Thresholds {
            open_hand_threshold,
            swipe_threshold,
        }
    }
}
