//! JSON-lines landmark stream.
//!
//! Each line carries one frame:
//!
//! ```text
//! {"t": 1.25, "width": 640, "height": 480, "key": "c",
//!  "hands": [{"handedness": "Right", "score": 0.97, "landmarks": [{"x": 0.5, "y": 0.4}, ...]}]}
//! ```
//!
//! `t` is in seconds; when absent the arrival time is used. Blank lines and
//! the tracker's `READY` line are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use handctl_core::domain::{Frame, FrameDimensions, HandObservation, Handedness, Landmark};
use handctl_core::ports::{HandObservationSource, SourceError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Line the tracker prints once its model is loaded.
pub const READY_LINE: &str = "READY";

#[derive(Debug, Serialize, Deserialize)]
struct FrameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    t: Option<f64>,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default)]
    hands: Vec<HandRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HandRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handedness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    landmarks: Vec<Landmark>,
}

const fn default_width() -> u32 {
    FrameDimensions::DEFAULT_WIDTH
}

const fn default_height() -> u32 {
    FrameDimensions::DEFAULT_HEIGHT
}

/// Landmark source reading JSON lines from any buffered reader.
pub struct JsonLinesSource<R> {
    reader: R,
    origin: String,
    min_confidence: f64,
    started: Instant,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Wraps a reader. `origin` names the stream in log messages.
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            min_confidence: 0.0,
            started: Instant::now(),
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Drops hands whose reported score is below `min_confidence`.
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.set_min_confidence(min_confidence);
        self
    }

    /// Changes the score below which hands are dropped.
    pub fn set_min_confidence(&mut self, min_confidence: f64) {
        self.min_confidence = min_confidence;
    }

    /// Number of lines read so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }

    fn decode(&self, line: &str) -> Result<Frame, SourceError> {
        let record: FrameRecord = serde_json::from_str(line).map_err(|e| {
            SourceError::FrameRead(format!("{} line {}: {e}", self.origin, self.line_no))
        })?;

        let timestamp = match record.t {
            Some(t) => Duration::try_from_secs_f64(t).map_err(|e| {
                SourceError::FrameRead(format!(
                    "{} line {}: bad timestamp {t}: {e}",
                    self.origin, self.line_no
                ))
            })?,
            None => self.started.elapsed(),
        };

        let hands = record
            .hands
            .into_iter()
            .filter_map(|hand| self.decode_hand(hand))
            .collect();

        let mut frame = Frame::new(
            timestamp,
            FrameDimensions::new(record.width, record.height),
            hands,
        );
        frame.pressed_key = record.key.as_deref().and_then(|key| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    debug!("{} line {}: ignoring key {key:?}", self.origin, self.line_no);
                    None
                }
            }
        });
        Ok(frame)
    }

    fn decode_hand(&self, hand: HandRecord) -> Option<HandObservation> {
        if hand.score.is_some_and(|s| s < self.min_confidence) {
            trace!("Dropping hand with score {:?}", hand.score);
            return None;
        }

        let handedness = hand
            .handedness
            .as_deref()
            .and_then(|label| match label.parse::<Handedness>() {
                Ok(h) => Some(h),
                Err(_) => {
                    debug!("Unknown handedness {label:?}");
                    None
                }
            });

        let count = hand.landmarks.len();
        let observation = HandObservation::from_slice(handedness, &hand.landmarks);
        if observation.is_none() {
            warn!(
                "{} line {}: dropping hand with {count} landmarks",
                self.origin, self.line_no
            );
        }
        observation
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Opens a recorded stream.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the file cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| {
            SourceError::Unavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl JsonLinesSource<io::StdinLock<'static>> {
    /// Reads the stream from standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), "stdin")
    }
}

impl<R: BufRead> HandObservationSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        loop {
            self.buf.clear();
            let read = match self.reader.read_line(&mut self.buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    self.line_no += 1;
                    return Err(SourceError::FrameRead(format!(
                        "{} line {}: {e}",
                        self.origin, self.line_no
                    )));
                }
                Err(e) => {
                    return Err(SourceError::Unavailable(format!(
                        "reading {}: {e}",
                        self.origin
                    )))
                }
            };
            if read == 0 {
                debug!("{} ended after {} lines", self.origin, self.line_no);
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() || line == READY_LINE {
                continue;
            }
            return self.decode(line).map(Some);
        }
    }
}

/// Writes one frame as a JSON line in the stream format.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    let record = FrameRecord {
        t: Some(frame.timestamp.as_secs_f64()),
        width: frame.dimensions.width,
        height: frame.dimensions.height,
        key: frame.pressed_key.map(String::from),
        hands: frame
            .hands
            .iter()
            .map(|hand| HandRecord {
                handedness: hand.handedness.map(|h| match h {
                    Handedness::Left => "Left".to_string(),
                    Handedness::Right => "Right".to_string(),
                }),
                score: None,
                landmarks: hand.landmarks.to_vec(),
            })
            .collect(),
    };
    serde_json::to_writer(&mut *writer, &record).context("Failed to encode frame")?;
    writer.write_all(b"\n").context("Failed to write frame")?;
    Ok(())
}

/// Source wrapper that copies every frame it reads to a writer.
pub struct RecordingSource<S, W: Write> {
    inner: S,
    writer: W,
    failed: bool,
}

impl<S, W: Write> RecordingSource<S, W> {
    /// Tees frames from `inner` into `writer`.
    pub const fn new(inner: S, writer: W) -> Self {
        Self {
            inner,
            writer,
            failed: false,
        }
    }
}

impl<S: HandObservationSource, W: Write> HandObservationSource for RecordingSource<S, W> {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let frame = self.inner.next_frame()?;
        match &frame {
            Some(f) if !self.failed => {
                if let Err(e) = write_frame(&mut self.writer, f) {
                    warn!("Recording stopped: {e:#}");
                    self.failed = true;
                }
            }
            None => {
                if let Err(e) = self.writer.flush() {
                    warn!("Failed to flush recording: {e}");
                }
            }
            Some(_) => {}
        }
        Ok(frame)
    }
}
