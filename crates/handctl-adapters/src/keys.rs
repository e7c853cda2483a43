//! Key sinks that deliver presses to the host.

use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use handctl_core::domain::Key;
use handctl_core::ports::KeySink;
use tracing::debug;

/// Runs a command with the key name appended, e.g. `xdotool key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandKeySink {
    program: String,
    args: Vec<String>,
}

impl CommandKeySink {
    /// Creates a sink from a program and its leading arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if `command` is empty.
    pub fn new(command: &[String]) -> Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("key command is empty");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl KeySink for CommandKeySink {
    fn press(&self, key: &Key) -> Result<()> {
        let key = key.to_string();
        debug!("Running {} {} {key}", self.program, self.args.join(" "));
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&key)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {status} for key {key}", self.program);
        }
        Ok(())
    }
}

#[cfg(feature = "enigo")]
pub use native::EnigoKeySink;

#[cfg(feature = "enigo")]
mod native {
    use std::sync::{Mutex, PoisonError};

    use anyhow::{Context, Result};
    use enigo::{Direction, Enigo, Keyboard, Settings};
    use handctl_core::domain::Key;
    use handctl_core::ports::KeySink;

    /// Injects key presses through the platform input API.
    pub struct EnigoKeySink {
        enigo: Mutex<Enigo>,
    }

    impl EnigoKeySink {
        /// Connects to the platform input API.
        ///
        /// # Errors
        ///
        /// Returns an error if no input connection can be established.
        pub fn new() -> Result<Self> {
            let enigo = Enigo::new(&Settings::default())
                .context("Failed to connect to the input system")?;
            Ok(Self {
                enigo: Mutex::new(enigo),
            })
        }
    }

    impl KeySink for EnigoKeySink {
        fn press(&self, key: &Key) -> Result<()> {
            let mut enigo = self.enigo.lock().unwrap_or_else(PoisonError::into_inner);
            let code = match key {
                Key::Char(c) => enigo::Key::Unicode(*c),
                Key::Up => enigo::Key::UpArrow,
                Key::Down => enigo::Key::DownArrow,
                Key::Space => enigo::Key::Space,
                Key::Backspace => enigo::Key::Backspace,
                Key::Text(text) => {
                    return enigo
                        .text(text)
                        .with_context(|| format!("Failed to type {text}"));
                }
            };
            enigo
                .key(code, Direction::Click)
                .with_context(|| format!("Failed to press {key}"))
        }
    }
}
