//! Thresholds command - inspect the stored calibration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::source::SourceArgs;
use crate::config::AppConfig;

/// Arguments for the thresholds command
#[derive(Args)]
pub struct ThresholdsArgs {
    #[command(subcommand)]
    pub command: ThresholdsCommand,

    /// Threshold file (default: calibration.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub thresholds_file: Option<PathBuf>,
}

/// Thresholds subcommands
#[derive(Subcommand)]
pub enum ThresholdsCommand {
    /// Print the stored thresholds (defaults if none) as JSON
    Show,
    /// Print the threshold file path
    Path,
}

/// Run the thresholds command.
pub fn run(args: &ThresholdsArgs, config: &AppConfig) -> Result<()> {
    let source = SourceArgs::with_config(
        SourceArgs::for_thresholds_file(args.thresholds_file.clone()),
        config,
    );
    let store = source.store();

    match args.command {
        ThresholdsCommand::Show => {
            let thresholds = store.load_or_default()?;
            println!("{}", serde_json::to_string_pretty(&thresholds)?);
        }
        ThresholdsCommand::Path => println!("{}", store.path().display()),
    }
    Ok(())
}
