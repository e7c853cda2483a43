//! Maps fired gestures to key presses and feedback.

use tracing::{info, warn};

use crate::domain::{Gesture, Key, VirtualKey};
use crate::ports::{FeedbackEvent, FeedbackSink, KeySink};
use crate::session::FiredGesture;

/// Key sent for a gesture, or `None` for internal-only gestures.
#[must_use]
pub fn key_for(gesture: &Gesture) -> Option<Key> {
    match gesture {
        Gesture::Next => Some(Key::Char('l')),
        Gesture::Previous => Some(Key::Char('j')),
        Gesture::PlayPause => Some(Key::Char('k')),
        Gesture::VolumeUp => Some(Key::Up),
        Gesture::VolumeDown => Some(Key::Down),
        Gesture::KeyTap(key) => match key {
            VirtualKey::Letter(c) => Some(Key::Char(c.to_ascii_lowercase())),
            VirtualKey::Space => Some(Key::Space),
            VirtualKey::Backspace => Some(Key::Backspace),
            VirtualKey::Emoji(text) => Some(Key::Text((*text).to_string())),
            VirtualKey::EmojiToggle => None,
        },
    }
}

/// Sends keys for fired gestures and reports them as feedback.
pub struct ActionDispatcher<'a> {
    keys: &'a dyn KeySink,
    feedback: &'a dyn FeedbackSink,
}

impl<'a> ActionDispatcher<'a> {
    /// Creates a dispatcher over the given sinks.
    #[must_use]
    pub fn new(keys: &'a dyn KeySink, feedback: &'a dyn FeedbackSink) -> Self {
        Self { keys, feedback }
    }

    /// Presses the gesture's key and emits a feedback event.
    ///
    /// A failed key press is logged and otherwise ignored. Returns the key
    /// that was resolved for the gesture.
    pub fn dispatch(&self, fired: &FiredGesture) -> Option<Key> {
        let key = key_for(&fired.gesture);

        match &key {
            Some(k) => {
                info!("{} ({}) -> {k}", fired.label(), fired.hand);
                if let Err(e) = self.keys.press(k) {
                    warn!("Failed to press {k}: {e:#}");
                }
            }
            None => info!("{} ({})", fired.label(), fired.hand),
        }

        self.feedback.on_event(FeedbackEvent::GestureFired {
            hand: fired.hand,
            gesture: fired.gesture,
            key: key.clone(),
        });
        key
    }
}
