//! Buildpack-style console output
//!
//! Staging logs on the platform follow a fixed layout: steps start with an
//! arrow, details are indented to line up under the step text.

use super::{ProgressEvent, ProgressHandler};
use std::io::{self, Write};
use std::sync::Mutex;

const STEP_PREFIX: &str = "-----> ";
const DETAIL_INDENT: &str = "       ";

pub struct ConsoleHandler {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleHandler {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn format(event: &ProgressEvent) -> String {
        match event {
            ProgressEvent::Step { message } => format!("{}{}", STEP_PREFIX, message),
            ProgressEvent::Info { message } => indent(message),
            ProgressEvent::Warning { message } => indent(&format!("WARNING: {}", message)),
        }
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", DETAIL_INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if let Ok(mut out) = self.out.lock() {
            // staging output is best effort; a closed pipe must not fail the build
            let _ = writeln!(out, "{}", Self::format(event));
        }
    }
}
