//! handctl - webcam gesture control.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::calibrate::CalibrateArgs;
use commands::run::RunArgs;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let result = match cli.command {
        Some(Commands::Run(args)) => {
            commands::run::run(&RunArgs::with_config(args, &config)).map(|_| ())
        }
        Some(Commands::Calibrate(args)) => {
            commands::calibrate::run(&CalibrateArgs::with_config(args, &config)).map(|_| ())
        }
        Some(Commands::Thresholds(ref args)) => commands::thresholds::run(args, &config),
        // Default behavior: run with flattened args
        None => commands::run::run(&RunArgs::with_config(cli.run, &config)).map(|_| ()),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
