//! External hand tracker process.
//!
//! The tracker owns the camera, the landmark model and the preview window,
//! and writes the JSON-lines stream on its stdout.

use std::io::BufReader;
use std::process::{Child, ChildStdout, Command, Stdio};

use handctl_core::domain::Frame;
use handctl_core::ports::{HandObservationSource, SourceError};
use tracing::{debug, info, warn};

use crate::stream::JsonLinesSource;

/// A running tracker whose stdout is read as a landmark stream.
///
/// The child is killed and reaped when this value is dropped.
pub struct TrackerProcess {
    child: Child,
    source: JsonLinesSource<BufReader<ChildStdout>>,
}

impl TrackerProcess {
    /// Starts `command` (program followed by its arguments).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the command is empty or
    /// cannot be started.
    pub fn spawn(command: &[String]) -> Result<Self, SourceError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| SourceError::Unavailable("no tracker command configured".into()))?;

        info!("Starting hand tracker: {}", command.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SourceError::Unavailable(format!("failed to start `{program}`: {e}")))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SourceError::Unavailable(format!(
                "`{program}` has no stdout"
            )));
        };

        debug!("Tracker running with pid {}", child.id());
        Ok(Self {
            child,
            source: JsonLinesSource::new(BufReader::new(stdout), program.clone()),
        })
    }

    /// Drops hands whose reported score is below `min_confidence`.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.source.set_min_confidence(min_confidence);
        self
    }

    /// OS process id of the tracker.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl HandObservationSource for TrackerProcess {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let frame = self.source.next_frame()?;
        if frame.is_none() {
            match self.child.wait() {
                Ok(status) if !status.success() => {
                    return Err(SourceError::Unavailable(format!(
                        "tracker exited with {status}"
                    )));
                }
                Ok(_) => debug!("Tracker exited"),
                Err(e) => warn!("Failed to wait for tracker: {e}"),
            }
        }
        Ok(frame)
    }
}

impl Drop for TrackerProcess {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(Some(_))) {
            return;
        }
        if let Err(e) = self.child.kill() {
            warn!("Failed to stop tracker: {e}");
        }
        let _ = self.child.wait();
        info!("Hand tracker stopped");
    }
}
