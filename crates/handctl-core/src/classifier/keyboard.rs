//! On-screen virtual keyboard layouts and hit testing.

use crate::domain::{PixelPoint, VirtualKey};

/// Side length of a key cell in pixels.
pub const KEY_SIZE: f64 = 50.0;

/// A key cell anchored at its top-left corner, in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCell {
    /// Key produced by the cell.
    pub key: VirtualKey,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
}

impl KeyCell {
    const fn new(key: VirtualKey, x: u32, y: u32) -> Self {
        Self { key, x, y }
    }

    /// Whether `point` lies inside the cell, edges included.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        (x..=x + KEY_SIZE).contains(&point.x) && (y..=y + KEY_SIZE).contains(&point.y)
    }
}

const LETTER_LAYOUT: &[KeyCell] = &[
    KeyCell::new(VirtualKey::Letter('Q'), 50, 50),
    KeyCell::new(VirtualKey::Letter('W'), 110, 50),
    KeyCell::new(VirtualKey::Letter('E'), 170, 50),
    KeyCell::new(VirtualKey::Letter('R'), 230, 50),
    KeyCell::new(VirtualKey::Letter('T'), 290, 50),
    KeyCell::new(VirtualKey::Letter('A'), 50, 110),
    KeyCell::new(VirtualKey::Letter('S'), 110, 110),
    KeyCell::new(VirtualKey::Letter('D'), 170, 110),
    KeyCell::new(VirtualKey::Letter('F'), 230, 110),
    KeyCell::new(VirtualKey::Letter('G'), 290, 110),
    KeyCell::new(VirtualKey::Letter('Z'), 50, 170),
    KeyCell::new(VirtualKey::Letter('X'), 110, 170),
    KeyCell::new(VirtualKey::Letter('C'), 170, 170),
    KeyCell::new(VirtualKey::Letter('V'), 230, 170),
    KeyCell::new(VirtualKey::Letter('B'), 290, 170),
    KeyCell::new(VirtualKey::EmojiToggle, 50, 230),
    KeyCell::new(VirtualKey::Space, 110, 230),
    KeyCell::new(VirtualKey::Backspace, 230, 230),
];

const EMOJI_LAYOUT: &[KeyCell] = &[
    KeyCell::new(VirtualKey::Emoji("😊"), 50, 50),
    KeyCell::new(VirtualKey::Emoji("😂"), 110, 50),
    KeyCell::new(VirtualKey::Emoji("😍"), 170, 50),
    KeyCell::new(VirtualKey::Emoji("👍"), 50, 110),
    KeyCell::new(VirtualKey::Emoji("👎"), 110, 110),
    KeyCell::new(VirtualKey::Emoji("🙌"), 170, 110),
    // Back to letters.
    KeyCell::new(VirtualKey::EmojiToggle, 50, 170),
];

/// The two fixed keyboard layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualKeyboard;

impl VirtualKeyboard {
    /// Cells of the active layout.
    #[must_use]
    pub const fn layout(&self, emoji_mode: bool) -> &'static [KeyCell] {
        if emoji_mode {
            EMOJI_LAYOUT
        } else {
            LETTER_LAYOUT
        }
    }

    /// Key under `point`, if any.
    #[must_use]
    pub fn key_at(&self, point: PixelPoint, emoji_mode: bool) -> Option<VirtualKey> {
        self.layout(emoji_mode)
            .iter()
            .find(|cell| cell.contains(point))
            .map(|cell| cell.key)
    }
}
