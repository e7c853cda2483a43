//! Landmark source selection shared by `run` and `calibrate`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use handctl_adapters::{JsonLinesSource, ThresholdStore, TrackerProcess, DEFAULT_THRESHOLDS_FILE};
use handctl_core::ports::HandObservationSource;
use tracing::info;

use crate::config::AppConfig;

/// Parse and validate a detection score (0.0-1.0).
fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Splits a command line on whitespace.
pub fn split_command(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Where landmarks come from and where thresholds live.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Replay a recorded landmark stream ('-' reads stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "tracker")]
    pub replay: Option<PathBuf>,

    /// Tracker command writing the landmark stream to stdout
    #[arg(long, value_name = "CMD")]
    pub tracker: Option<String>,

    /// Minimum hand detection score (0.0-1.0)
    #[arg(long, value_parser = parse_confidence)]
    pub min_confidence: Option<f64>,

    /// Threshold file (default: calibration.json)
    #[arg(long, value_name = "PATH")]
    pub thresholds_file: Option<PathBuf>,

    /// Tracker command from the config file.
    #[arg(skip)]
    config_tracker: Option<Vec<String>>,
}

impl SourceArgs {
    /// Source arguments with only a threshold file set.
    pub fn for_thresholds_file(thresholds_file: Option<PathBuf>) -> Self {
        Self {
            thresholds_file,
            ..Self::default()
        }
    }

    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.min_confidence = args.min_confidence.or(config.source.min_confidence);
        if args.thresholds_file.is_none() {
            args.thresholds_file.clone_from(&config.general.thresholds_file);
        }
        args.config_tracker.clone_from(&config.source.tracker);
        args
    }

    /// Threshold store at the configured path.
    pub fn store(&self) -> ThresholdStore {
        ThresholdStore::new(
            self.thresholds_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_THRESHOLDS_FILE)),
        )
    }

    /// Tracker command: CLI first, then config.
    fn tracker_command(&self) -> Option<Vec<String>> {
        self.tracker
            .as_deref()
            .map(split_command)
            .or_else(|| self.config_tracker.clone())
            .filter(|c| !c.is_empty())
    }

    /// Opens the selected landmark source.
    pub fn open(&self) -> Result<Box<dyn HandObservationSource>> {
        let min_confidence = self.min_confidence.unwrap_or(0.0);

        if let Some(path) = &self.replay {
            if path == Path::new("-") {
                info!("Reading landmark stream from stdin");
                return Ok(Box::new(
                    JsonLinesSource::stdin().with_min_confidence(min_confidence),
                ));
            }
            info!("Replaying {}", path.display());
            let source = JsonLinesSource::from_path(path)?;
            return Ok(Box::new(source.with_min_confidence(min_confidence)));
        }

        if let Some(command) = self.tracker_command() {
            let tracker = TrackerProcess::spawn(&command)?;
            return Ok(Box::new(tracker.with_min_confidence(min_confidence)));
        }

        bail!("No landmark source: pass --replay FILE or --tracker CMD, or set [source] tracker in the config")
    }
}
