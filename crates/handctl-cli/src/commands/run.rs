//! Run command - translate gestures into key presses.

use std::fs::File;
use std::io::{BufWriter, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use handctl_adapters::{CommandKeySink, RecordingSource, ThresholdStore};
use handctl_core::calibration::Calibrator;
use handctl_core::classifier::GestureConfig;
use handctl_core::domain::{Mode, Thresholds};
use handctl_core::ports::{FeedbackEvent, FeedbackSink, HandObservationSource, KeySink};
use handctl_core::{ActionDispatcher, GestureSession};
use tracing::{info, warn};

use super::source::{split_command, SourceArgs};
use crate::config::AppConfig;
use crate::output::{JsonKeyOutput, TerminalFeedback};

/// Key that ends the run.
const QUIT_KEY: char = 'q';
/// Key that starts a recalibration.
const RECALIBRATE_KEY: char = 'c';
/// Key that switches between media and keyboard mode.
const MODE_KEY: char = 'm';

/// Where key presses go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyBackend {
    /// One JSON object per press on stdout
    #[default]
    Json,
    /// Run --key-command with the key name appended
    Command,
    /// Native key injection (needs the `enigo` build feature)
    Enigo,
}

/// Parse a non-negative number of seconds.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number of seconds"))
    }
}

/// Arguments for the run command.
#[derive(Args, Clone, Default)]
pub struct RunArgs {
    /// Landmark source and threshold file.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Seconds between two gestures of the same hand (default 0.6)
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    pub cooldown: Option<f64>,

    /// Start-up mode
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Key output backend
    #[arg(long, value_enum)]
    pub keys: Option<KeyBackend>,

    /// Command run per key press, key name appended (e.g. "xdotool key")
    #[arg(long, value_name = "CMD")]
    pub key_command: Option<String>,

    /// Calibrate even if a threshold file exists
    #[arg(long)]
    pub recalibrate: bool,

    /// Copy the landmark stream to a file for later --replay
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Suppress feedback output
    #[arg(short, long)]
    pub quiet: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.source = SourceArgs::with_config(args.source, config);
        args.cooldown = args.cooldown.or(config.gestures.cooldown_secs);

        if args.mode.is_none() {
            args.mode = config.general.mode.as_deref().and_then(|m| m.parse().ok());
        }
        if args.keys.is_none() {
            args.keys = config
                .keys
                .backend
                .as_deref()
                .and_then(|b| KeyBackend::from_str(b, true).ok());
        }

        args.config = Some(config.clone());
        args
    }

    /// Cooldown with fallback to the classifier default.
    fn gesture_config(&self) -> GestureConfig {
        self.cooldown
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
            .map_or_else(GestureConfig::default, |cooldown| GestureConfig { cooldown })
    }

    fn calibrator(&self) -> Calibrator {
        Calibrator::new(
            self.config
                .as_ref()
                .map(AppConfig::calibration_config)
                .unwrap_or_default(),
        )
    }

    /// Key command: CLI first, then config.
    fn key_command(&self) -> Vec<String> {
        self.key_command
            .as_deref()
            .map(split_command)
            .or_else(|| self.config.as_ref().and_then(|c| c.keys.command.clone()))
            .unwrap_or_default()
    }

    fn key_sink(&self) -> Result<Box<dyn KeySink>> {
        match self.keys.unwrap_or_default() {
            KeyBackend::Json => Ok(Box::new(JsonKeyOutput::stdout())),
            KeyBackend::Command => {
                let command = self.key_command();
                if command.is_empty() {
                    bail!("--keys command needs --key-command or [keys] command in the config");
                }
                Ok(Box::new(CommandKeySink::new(&command)?))
            }
            KeyBackend::Enigo => enigo_sink(),
        }
    }
}

#[cfg(feature = "enigo")]
fn enigo_sink() -> Result<Box<dyn KeySink>> {
    Ok(Box::new(handctl_adapters::EnigoKeySink::new()?))
}

#[cfg(not(feature = "enigo"))]
fn enigo_sink() -> Result<Box<dyn KeySink>> {
    bail!("handctl was built without native key injection; rebuild with `--features enigo`")
}

/// Counters reported when the run ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames processed.
    pub frames: usize,
    /// Frames that could not be decoded.
    pub skipped: usize,
    /// Gestures that fired.
    pub gestures: usize,
    /// Gestures held back by the cooldown.
    pub suppressed: usize,
}

/// Run the gesture loop.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &RunArgs) -> Result<RunSummary> {
    let store = args.source.store();
    let calibrator = args.calibrator();
    let show_spinner = !args.quiet && std::io::stderr().is_terminal();
    let feedback = TerminalFeedback::new(args.quiet, show_spinner);
    let keys = args.key_sink()?;

    let mut source = args.source.open()?;
    if let Some(path) = &args.record {
        let file = File::create(path)
            .with_context(|| format!("Failed to create recording {}", path.display()))?;
        info!("Recording landmark stream to {}", path.display());
        source = Box::new(RecordingSource::new(source, BufWriter::new(file)));
    }

    let stored = match store.load() {
        Ok(t) => t,
        Err(e) => {
            warn!("{e:#}; recalibrating");
            None
        }
    };
    let thresholds = match stored {
        Some(t) if !args.recalibrate => {
            info!("Loaded calibration from {}", store.path().display());
            t
        }
        previous => calibrate(
            &calibrator,
            &mut source,
            &feedback,
            &store,
            previous.unwrap_or_default(),
        )?,
    };

    let mode = args.mode.unwrap_or_default();
    let mut session = GestureSession::new(args.gesture_config(), thresholds).with_mode(mode);
    let dispatcher = ActionDispatcher::new(keys.as_ref(), &feedback);
    let mut summary = RunSummary::default();

    info!(
        "Gesture control started in {mode} mode. Keys: '{QUIT_KEY}' quit, '{RECALIBRATE_KEY}' recalibrate, '{MODE_KEY}' switch mode"
    );

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("Landmark stream ended");
                break;
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping frame: {e}");
                summary.skipped += 1;
                continue;
            }
            Err(e) => return Err(e).context("Landmark source failed"),
        };
        summary.frames += 1;

        for fired in session.process_frame(&frame) {
            dispatcher.dispatch(&fired);
            summary.gestures += 1;
        }

        match frame.pressed_key {
            Some(QUIT_KEY) => {
                info!("Quit requested");
                break;
            }
            Some(RECALIBRATE_KEY) => {
                info!("Recalibration requested");
                let thresholds = calibrate(
                    &calibrator,
                    &mut source,
                    &feedback,
                    &store,
                    *session.thresholds(),
                )?;
                session.set_thresholds(thresholds);
            }
            Some(MODE_KEY) => {
                let mode = session.toggle_mode();
                info!("Switched to {mode} mode");
                feedback.on_event(FeedbackEvent::ModeChanged { mode });
            }
            _ => {}
        }
    }

    summary.suppressed = session.suppressed_count();
    info!(
        "Done: {} frames, {} skipped, {} gestures, {} held back by cooldown",
        summary.frames, summary.skipped, summary.gestures, summary.suppressed
    );
    Ok(summary)
}

/// Runs one calibration pass and persists the result if it completed.
fn calibrate(
    calibrator: &Calibrator,
    source: &mut Box<dyn HandObservationSource>,
    feedback: &dyn FeedbackSink,
    store: &ThresholdStore,
    previous: Thresholds,
) -> Result<Thresholds> {
    let outcome = calibrator
        .calibrate(source, feedback, previous)
        .context("Calibration failed")?;

    if outcome.complete {
        store.save(&outcome.thresholds)?;
    } else {
        warn!(
            "Calibration did not finish; {} left unchanged",
            store.path().display()
        );
    }
    Ok(outcome.thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.6"), Ok(0.6));
        assert_eq!(parse_seconds("0"), Ok(0.0));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("soon").is_err());
    }

    #[test]
    fn test_default_cooldown() {
        assert_eq!(
            RunArgs::default().gesture_config().cooldown,
            Duration::from_millis(600)
        );
    }

    #[test]
    fn test_config_layering() {
        let config: AppConfig = toml::from_str(
            r#"
[general]
mode = "keyboard"

[gestures]
cooldown_secs = 1.5

[keys]
backend = "command"
command = ["xdotool", "key"]
"#,
        )
        .unwrap_or_default();

        let args = RunArgs::with_config(RunArgs::default(), &config);
        assert_eq!(args.mode, Some(Mode::Keyboard));
        assert_eq!(args.gesture_config().cooldown, Duration::from_millis(1_500));
        assert_eq!(args.keys, Some(KeyBackend::Command));
        assert_eq!(args.key_command(), vec!["xdotool", "key"]);

        let cli = RunArgs {
            mode: Some(Mode::Media),
            cooldown: Some(0.2),
            key_command: Some("ydotool key".to_string()),
            ..RunArgs::default()
        };
        let args = RunArgs::with_config(cli, &config);
        assert_eq!(args.mode, Some(Mode::Media));
        assert_eq!(args.gesture_config().cooldown, Duration::from_millis(200));
        assert_eq!(args.key_command(), vec!["ydotool", "key"]);
    }

    #[test]
    fn test_command_backend_needs_command() {
        let args = RunArgs {
            keys: Some(KeyBackend::Command),
            ..RunArgs::default()
        };
        assert!(args.key_sink().is_err());
    }

    #[test]
    fn test_calibration_windows_from_config() {
        let config: AppConfig =
            toml::from_str("[calibration]\nswipe_window_secs = 1.0\n").unwrap_or_default();
        let args = RunArgs::with_config(RunArgs::default(), &config);
        assert_eq!(
            args.calibrator().config().swipe_window,
            Duration::from_secs(1)
        );
    }
}
