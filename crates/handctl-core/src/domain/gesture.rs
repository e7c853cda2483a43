//! Gestures, modes and the key vocabulary they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Interaction mode shared by both hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Tap keys on the virtual keyboard.
    Keyboard,
    /// Control a media player.
    #[default]
    Media,
}

impl Mode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Keyboard => Self::Media,
            Self::Media => Self::Keyboard,
        }
    }

    /// Lowercase mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyboard" => Ok(Self::Keyboard),
            "media" => Ok(Self::Media),
            other => Err(format!("unknown mode '{other}', expected 'keyboard' or 'media'")),
        }
    }
}

/// Coarse hand pose derived from the calibrated open-hand threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPose {
    /// Pinch distance above the open-hand threshold.
    Open,
    /// Pinch distance at or below the open-hand threshold.
    Closed,
}

/// A cell on the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualKey {
    /// A letter key.
    Letter(char),
    /// The space bar.
    Space,
    /// Delete the previous character.
    Backspace,
    /// Switch between the letter and emoji layouts.
    EmojiToggle,
    /// An emoji inserted as text.
    Emoji(&'static str),
}

impl VirtualKey {
    /// Text drawn on the key cap.
    #[must_use]
    pub fn caption(&self) -> String {
        match self {
            Self::Letter(c) => c.to_string(),
            Self::Space => "SPACE".to_string(),
            Self::Backspace => "BACK".to_string(),
            Self::EmojiToggle => "EMOJI".to_string(),
            Self::Emoji(e) => (*e).to_string(),
        }
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Pinch opened quickly: skip forward.
    Next,
    /// Pinch closed quickly: skip back.
    Previous,
    /// Thumb and index tips touching.
    PlayPause,
    /// Thumb above wrist and index base.
    VolumeUp,
    /// Thumb below wrist and index base.
    VolumeDown,
    /// Tap on a virtual keyboard cell.
    KeyTap(VirtualKey),
}

impl Gesture {
    /// Stable snake_case name for structured output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
            Self::PlayPause => "play_pause",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::KeyTap(_) => "key_tap",
        }
    }

    /// Human-readable feedback label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Next => "Next Video →".to_string(),
            Self::Previous => "Previous Video ←".to_string(),
            Self::PlayPause => "Play / Pause".to_string(),
            Self::VolumeUp => "Volume ↑ (Like)".to_string(),
            Self::VolumeDown => "Volume ↓ (Dislike)".to_string(),
            Self::KeyTap(key) => format!("Key: {}", key.caption()),
        }
    }

    /// Feedback color.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::Next | Self::Previous | Self::PlayPause => Color::GREEN,
            Self::VolumeUp | Self::VolumeDown => Color::YELLOW,
            Self::KeyTap(_) => Color::WHITE,
        }
    }
}

/// RGB color for on-screen feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Media gesture color.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Volume gesture color.
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Keyboard mode color.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Media mode indicator color.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A simulated key press sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A single printable character key, e.g. `l`.
    Char(char),
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Literal text typed as-is (emoji).
    Text(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Space => f.write_str("space"),
            Self::Backspace => f.write_str("backspace"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Media.toggled(), Mode::Keyboard);
        assert_eq!(Mode::Keyboard.toggled(), Mode::Media);
        assert_eq!(Mode::default(), Mode::Media);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("keyboard".parse::<Mode>(), Ok(Mode::Keyboard));
        assert!("typing".parse::<Mode>().is_err());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Char('l').to_string(), "l");
        assert_eq!(Key::Up.to_string(), "up");
        assert_eq!(Key::Down.to_string(), "down");
        assert_eq!(Key::Space.to_string(), "space");
        assert_eq!(Key::Text("😊".into()).to_string(), "😊");
    }

    #[test]
    fn test_gesture_labels_and_colors() {
        assert_eq!(Gesture::PlayPause.label(), "Play / Pause");
        assert_eq!(Gesture::VolumeUp.color(), Color::YELLOW);
        assert_eq!(
            Gesture::KeyTap(VirtualKey::Letter('Q')).label(),
            "Key: Q"
        );
    }
}
