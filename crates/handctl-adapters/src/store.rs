//! Threshold persistence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use handctl_core::domain::Thresholds;
use tracing::{debug, info};

/// Default threshold file, relative to the working directory.
pub const DEFAULT_THRESHOLDS_FILE: &str = "calibration.json";

/// JSON file holding the calibrated thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdStore {
    path: PathBuf,
}

impl ThresholdStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the threshold file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the threshold file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the stored thresholds.
    ///
    /// Returns `Ok(None)` when no file exists. Missing keys take their
    /// defaults and out-of-range values are reset field by field.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object
    /// of numbers.
    pub fn load(&self) -> Result<Option<Thresholds>> {
        if !self.exists() {
            debug!("No threshold file at {}", self.path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let thresholds: Thresholds = serde_json::from_str(&text)
            .with_context(|| format!("Invalid threshold file {}", self.path.display()))?;

        debug!("Loaded thresholds from {}", self.path.display());
        Ok(Some(thresholds.sanitized()))
    }

    /// Loads the stored thresholds, or the defaults when there are none.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_or_default(&self) -> Result<Thresholds> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Writes the thresholds.
    ///
    /// The file is written next to its final location and renamed into
    /// place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, thresholds: &Thresholds) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(thresholds)
            .context("Failed to serialize thresholds")?;
        let tmp = self.temp_path();
        fs::write(&tmp, json + "\n")
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to replace {}", self.path.display()));
        }

        info!("Thresholds saved to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "thresholds".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl Default for ThresholdStore {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS_FILE)
    }
}
