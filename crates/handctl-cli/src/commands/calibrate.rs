//! Calibrate command - derive thresholds and store them.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Args;
use handctl_core::calibration::{CalibrationOutcome, Calibrator};
use tracing::{info, warn};

use super::source::SourceArgs;
use crate::config::AppConfig;
use crate::output::TerminalFeedback;

/// Arguments for the calibrate command.
#[derive(Args, Clone, Default)]
pub struct CalibrateArgs {
    /// Landmark source and threshold file.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the thresholds without writing the threshold file
    #[arg(long)]
    pub no_save: bool,

    /// Suppress feedback output
    #[arg(short, long)]
    pub quiet: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CalibrateArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.source = SourceArgs::with_config(args.source, config);
        args.config = Some(config.clone());
        args
    }
}

/// Run the calibrate command.
///
/// Prints the resulting thresholds as JSON on stdout.
pub fn run(args: &CalibrateArgs) -> Result<CalibrationOutcome> {
    let store = args.source.store();
    let previous = match store.load() {
        Ok(t) => t.unwrap_or_default(),
        Err(e) => {
            warn!("{e:#}; starting from defaults");
            Default::default()
        }
    };

    let calibrator = Calibrator::new(
        args.config
            .as_ref()
            .map(AppConfig::calibration_config)
            .unwrap_or_default(),
    );
    let show_spinner = !args.quiet && std::io::stderr().is_terminal();
    let feedback = TerminalFeedback::new(args.quiet, show_spinner);

    let mut source = args.source.open()?;
    let outcome = calibrator
        .calibrate(&mut source, &feedback, previous)
        .context("Calibration failed")?;

    if args.no_save {
        info!("Not saving thresholds (--no-save)");
    } else if outcome.complete {
        store.save(&outcome.thresholds)?;
    } else {
        warn!(
            "Calibration did not finish; {} left unchanged",
            store.path().display()
        );
    }

    println!("{}", serde_json::to_string_pretty(&outcome.thresholds)?);
    Ok(outcome)
}
