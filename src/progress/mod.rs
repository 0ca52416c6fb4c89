//! User-facing progress reporting
//!
//! Resolvers never print. Warnings and informational messages meant for the
//! person pushing the app are emitted as [`ProgressEvent`]s to whichever
//! [`ProgressHandler`] the caller injected.

mod console;
mod handler;
mod logging;

pub use console::ConsoleHandler;
pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler, RecordingHandler};
pub use logging::LoggingHandler;
