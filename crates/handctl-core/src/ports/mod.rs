//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the gesture core and the
//! tracker, key injection and feedback adapters.

mod feedback;
mod key_sink;
mod observation_source;

pub use feedback::{FeedbackEvent, FeedbackSink, NoFeedback};
pub use key_sink::KeySink;
pub use observation_source::{HandObservationSource, SourceError};
