//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Step { message } => {
                info!(step = %message, "Build step");
            }
            ProgressEvent::Info { message } => {
                info!("{}", message);
            }
            ProgressEvent::Warning { message } => {
                warn!("{}", message);
            }
        }
    }
}
