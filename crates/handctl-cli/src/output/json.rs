//! JSON key event output.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use handctl_core::domain::Key;
use handctl_core::ports::KeySink;
use serde::Serialize;
use tracing::debug;

/// One key press as written to the output stream.
#[derive(Debug, Serialize)]
struct KeyEvent<'a> {
    timestamp: String,
    key: &'a Key,
}

/// Key sink printing one JSON object per press.
pub struct JsonKeyOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonKeyOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl KeySink for JsonKeyOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn press(&self, key: &Key) -> Result<()> {
        let json = serde_json::to_string(&KeyEvent {
            timestamp: iso_timestamp(),
            key,
        })?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
