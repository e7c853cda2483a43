//! CLI command definitions and handlers.

pub mod calibrate;
pub mod run;
pub mod source;
pub mod thresholds;

use clap::{Parser, Subcommand};

/// handctl - control media playback and type with hand gestures
#[derive(Parser)]
#[command(name = "handctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run arguments used when no subcommand is given.
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Translate hand gestures into key presses
    Run(run::RunArgs),
    /// Calibrate the open-hand and swipe thresholds
    Calibrate(calibrate::CalibrateArgs),
    /// Inspect the stored thresholds
    Thresholds(thresholds::ThresholdsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed.
    Success,
    /// Command failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::Error => Self::FAILURE,
        }
    }
}
