//! Structured logging setup
//!
//! Log lines go to stderr through `tracing-subscriber`; stdout is reserved for
//! the buildpack protocol output (detect names, release YAML, plans).
//! `RUST_LOG` is honored on top of the configured level, and initialization
//! happens at most once per process.
//!
//! # Example
//!
//! ```no_run
//! use dotnet_buildpack::util::logging;
//!
//! // DOTNET_BUILDPACK_LOG_LEVEL=debug DOTNET_BUILDPACK_LOG_JSON=true
//! logging::init_from_env();
//!
//! tracing::info!(app = "/tmp/app", "Resolving SDK version");
//! ```

use crate::config::BuildpackConfig;
use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Crate target used in filter directives
const CRATE_TARGET: &str = "dotnet_buildpack";

/// Dependencies that are chatty at debug level
const QUIET_TARGETS: [&str; 2] = ["ignore", "globset"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// One JSON object per line instead of human-readable text
    pub use_json: bool,

    /// Include the module target (e.g. `dotnet_buildpack::sdk`)
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level and format taken from the buildpack configuration
    pub fn from_buildpack_config(config: &BuildpackConfig) -> Self {
        Self {
            level: parse_level(&config.log_level).unwrap_or(Level::INFO),
            use_json: config.log_json,
            ..Default::default()
        }
    }

    /// Verbose preset for troubleshooting staging failures
    pub fn diagnostic() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: true,
            include_thread_ids: false,
        }
    }
}

/// Parses a level name case-insensitively
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("{}={}", CRATE_TARGET, level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    if env::var("RUST_LOG").is_err() {
        for target in QUIET_TARGETS {
            if let Ok(directive) = format!("{}=warn", target).parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// Installs the global subscriber; later calls are no-ops
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `DOTNET_BUILDPACK_LOG_LEVEL` and `DOTNET_BUILDPACK_LOG_JSON`
pub fn init_from_env() {
    init_logging(LoggingConfig::from_buildpack_config(&BuildpackConfig::default()));
}
