//! Configuration file support for handctl.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/handctl/config.toml` (lowest priority)
//! - Project-local: `.handctl.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};
use std::time::Duration;

use handctl_core::calibration::CalibrationConfig;
use handctl_core::domain::Mode;
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Calibration window lengths.
    pub calibration: CalibrationSection,
    /// Gesture classifier settings.
    pub gestures: GesturesConfig,
    /// Landmark source settings.
    pub source: SourceConfig,
    /// Key output settings.
    pub keys: KeysConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Threshold file location.
    pub thresholds_file: Option<PathBuf>,
    /// Start-up mode: "media" or "keyboard".
    pub mode: Option<String>,
}

/// Calibration window configuration, in seconds.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CalibrationSection {
    /// Open-hand window.
    pub open_window_secs: Option<f64>,
    /// Closed-hand window.
    pub closed_window_secs: Option<f64>,
    /// Swipe window.
    pub swipe_window_secs: Option<f64>,
}

/// Gesture classifier configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GesturesConfig {
    /// Minimum seconds between two gestures of the same hand.
    pub cooldown_secs: Option<f64>,
}

/// Landmark source configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Tracker command and arguments.
    pub tracker: Option<Vec<String>>,
    /// Minimum hand detection score (0.0-1.0).
    pub min_confidence: Option<f64>,
}

/// Key output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Backend: "json", "command" or "enigo".
    pub backend: Option<String>,
    /// Command run per key press, key name appended.
    pub command: Option<Vec<String>>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/handctl/config.toml`
    /// 2. Project-local: `.handctl.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref m) = self.general.mode {
            m.parse::<Mode>().map_err(|e| format!("general.mode: {e}"))?;
        }

        for (name, value) in [
            ("calibration.open_window_secs", self.calibration.open_window_secs),
            ("calibration.closed_window_secs", self.calibration.closed_window_secs),
            ("calibration.swipe_window_secs", self.calibration.swipe_window_secs),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(format!("{name} must be a positive number, got {v}"));
                }
            }
        }

        if let Some(c) = self.gestures.cooldown_secs {
            if !(c.is_finite() && c >= 0.0) {
                return Err(format!("gestures.cooldown_secs must be >= 0, got {c}"));
            }
        }

        if let Some(t) = self.source.min_confidence {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("source.min_confidence must be 0.0-1.0, got {t}"));
            }
        }

        if let Some(ref b) = self.keys.backend {
            if !matches!(b.as_str(), "json" | "command" | "enigo") {
                return Err(format!(
                    "keys.backend must be 'json', 'command' or 'enigo', got '{b}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.thresholds_file = other
            .general
            .thresholds_file
            .or_else(|| self.general.thresholds_file.take());
        self.general.mode = other.general.mode.or_else(|| self.general.mode.take());

        // Calibration
        self.calibration.open_window_secs = other
            .calibration
            .open_window_secs
            .or(self.calibration.open_window_secs);
        self.calibration.closed_window_secs = other
            .calibration
            .closed_window_secs
            .or(self.calibration.closed_window_secs);
        self.calibration.swipe_window_secs = other
            .calibration
            .swipe_window_secs
            .or(self.calibration.swipe_window_secs);

        // Gestures
        self.gestures.cooldown_secs = other.gestures.cooldown_secs.or(self.gestures.cooldown_secs);

        // Source
        self.source.tracker = other.source.tracker.or_else(|| self.source.tracker.take());
        self.source.min_confidence = other.source.min_confidence.or(self.source.min_confidence);

        // Keys
        self.keys.backend = other.keys.backend.or_else(|| self.keys.backend.take());
        self.keys.command = other.keys.command.or_else(|| self.keys.command.take());
    }

    /// Calibration windows, with hardcoded defaults for unset or invalid values.
    pub fn calibration_config(&self) -> CalibrationConfig {
        let defaults = CalibrationConfig::default();
        let window = |secs: Option<f64>, fallback: Duration| {
            secs.and_then(|s| Duration::try_from_secs_f64(s).ok())
                .filter(|d| !d.is_zero())
                .unwrap_or(fallback)
        };
        CalibrationConfig {
            open_window: window(self.calibration.open_window_secs, defaults.open_window),
            closed_window: window(self.calibration.closed_window_secs, defaults.closed_window),
            swipe_window: window(self.calibration.swipe_window_secs, defaults.swipe_window),
            ..defaults
        }
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("handctl").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.handctl.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".handctl.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.general.thresholds_file.is_none());
        assert!(config.gestures.cooldown_secs.is_none());
        assert!(config.source.tracker.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.keys.backend.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[general]
thresholds_file = "/tmp/handctl/calibration.json"
mode = "keyboard"

[calibration]
open_window_secs = 2.0
closed_window_secs = 2.5
swipe_window_secs = 4.0

[gestures]
cooldown_secs = 0.8

[source]
tracker = ["python3", "tracker.py", "--camera", "0"]
min_confidence = 0.6

[keys]
backend = "command"
command = ["xdotool", "key"]
"#;
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(
            config.general.thresholds_file,
            Some(PathBuf::from("/tmp/handctl/calibration.json"))
        );
        assert_eq!(config.general.mode.as_deref(), Some("keyboard"));
        assert_eq!(config.calibration.swipe_window_secs, Some(4.0));
        assert_eq!(config.gestures.cooldown_secs, Some(0.8));
        assert_eq!(config.source.tracker.as_ref().map(Vec::len), Some(4));
        assert_eq!(config.source.min_confidence, Some(0.6));
        assert_eq!(
            config.keys.command,
            Some(vec!["xdotool".to_string(), "key".to_string()])
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r#"
[gestures]
cooldown_secs = 0.5

[source]
tracker = ["tracker-a"]
"#,
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r#"
[gestures]
cooldown_secs = 1.0

[keys]
backend = "json"
"#,
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.gestures.cooldown_secs, Some(1.0));
        assert_eq!(base.source.tracker, Some(vec!["tracker-a".to_string()]));
        assert_eq!(base.keys.backend.as_deref(), Some("json"));
    }

    #[test]
    fn test_merge_preserves_base_when_override_is_none() {
        let mut base: AppConfig = toml::from_str(
            r#"
[general]
mode = "keyboard"

[calibration]
open_window_secs = 1.5
swipe_window_secs = 2.0
"#,
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[calibration]
open_window_secs = 4.0
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.calibration.open_window_secs, Some(4.0));
        assert_eq!(base.calibration.swipe_window_secs, Some(2.0));
        assert_eq!(base.general.mode.as_deref(), Some("keyboard"));
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let config: AppConfig = toml::from_str("[general]\nmode = 'typing'\n").unwrap();
        assert!(config.validate().unwrap_err().contains("general.mode"));
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config: AppConfig = toml::from_str("[source]\nmin_confidence = 1.5\n").unwrap();
        assert!(config.validate().is_err());

        let config: AppConfig = toml::from_str("[gestures]\ncooldown_secs = -1.0\n").unwrap();
        assert!(config.validate().is_err());

        let config: AppConfig =
            toml::from_str("[calibration]\nswipe_window_secs = 0.0\n").unwrap();
        assert!(config.validate().is_err());

        let config: AppConfig = toml::from_str("[keys]\nbackend = 'xdotool'\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_calibration_config_fallbacks() {
        let config: AppConfig = toml::from_str(
            r"
[calibration]
open_window_secs = 1.5
closed_window_secs = -2.0
",
        )
        .unwrap();
        let windows = config.calibration_config();
        assert_eq!(windows.open_window, Duration::from_millis(1_500));
        assert_eq!(windows.closed_window, Duration::from_secs(3));
        assert_eq!(windows.swipe_window, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[gestures
cooldown_secs = 0.5
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_find_config_in_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".handctl.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, dir.path().join(".handctl.toml"));
    }
}
