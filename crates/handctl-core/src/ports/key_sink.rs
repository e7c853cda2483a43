//! Key output port.

use crate::domain::Key;

/// Port for delivering simulated key presses to the host.
pub trait KeySink: Send + Sync {
    /// Presses and releases a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key could not be delivered.
    fn press(&self, key: &Key) -> anyhow::Result<()>;
}
