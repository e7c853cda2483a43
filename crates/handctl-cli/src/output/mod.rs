//! Output formatting for CLI.

mod feedback;
mod json;

pub use feedback::TerminalFeedback;
pub use json::JsonKeyOutput;
