//! Progress handler trait and events

use std::sync::Mutex;

/// Events emitted while resolving a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A build step started (`-----> Installing .NET Core SDK`)
    Step { message: String },

    /// Informational output, e.g. the runtime versions that were detected
    Info { message: String },

    /// Something the user should fix; never changes the outcome of the build
    Warning { message: String },
}

impl ProgressEvent {
    pub fn step(message: impl Into<String>) -> Self {
        ProgressEvent::Step {
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        ProgressEvent::Info {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        ProgressEvent::Warning {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProgressEvent::Step { message }
            | ProgressEvent::Info { message }
            | ProgressEvent::Warning { message } => message,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ProgressEvent::Warning { .. })
    }
}

/// Trait for handling progress events
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Keeps every event, in order
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(ProgressEvent::is_warning)
            .map(|e| e.message().to_string())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, ProgressEvent::Info { .. }))
            .map(|e| e.message().to_string())
            .collect()
    }
}

impl ProgressHandler for RecordingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
