//! Buildpack configuration
//!
//! Loaded from environment variables with defaults, so the same binary runs
//! inside a staging container and on a developer machine.
//!
//! # Environment Variables
//!
//! - `DOTNET_BUILDPACK_DIR`: directory holding the bundled catalogs - default: "."
//! - `DOTNET_BUILDPACK_MANIFEST`: explicit `manifest.yml` path
//! - `DOTNET_BUILDPACK_TOOLS`: explicit `dotnet-sdk-tools.yml` path
//! - `NUGET_PACKAGES_DIR`: NuGet cache root - default: `<app>/.nuget`
//! - `PUBLISH_RELEASE_CONFIG`: publish with `-c Release` (true|false) - default: "false"
//! - `DOTNET_BUILDPACK_LOG_LEVEL`: logging level - default: "info"
//! - `DOTNET_BUILDPACK_LOG_JSON`: JSON log lines (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use dotnet_buildpack::{BuildpackConfig, RealFileSystem};
//!
//! let config = BuildpackConfig::default();
//! config.validate().expect("Invalid configuration");
//! let catalog = config.load_catalog(&RealFileSystem).expect("catalogs");
//! ```

use crate::catalog::{Catalog, MANIFEST_FILE, TOOLS_FILE};
use crate::command::PublishConfiguration;
use crate::error::ResolveError;
use crate::fs::FileSystem;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_BUILDPACK_DIR: &str = ".";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PACKAGE_CACHE: &str = ".nuget";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Catalog file not found: {}", .0.display())]
    MissingCatalog(PathBuf),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone)]
pub struct BuildpackConfig {
    /// Directory holding `manifest.yml` and `dotnet-sdk-tools.yml`
    pub buildpack_dir: PathBuf,

    pub manifest_path: PathBuf,

    pub tools_path: PathBuf,

    /// NuGet cache root; `None` means `<app>/.nuget`
    pub package_cache_dir: Option<PathBuf>,

    pub publish_release: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,
}

impl Default for BuildpackConfig {
    /// Reads `DOTNET_BUILDPACK_*` and friends, falling back to defaults
    fn default() -> Self {
        let buildpack_dir = env::var("DOTNET_BUILDPACK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_BUILDPACK_DIR));

        let manifest_path = env::var("DOTNET_BUILDPACK_MANIFEST")
            .map(PathBuf::from)
            .unwrap_or_else(|_| buildpack_dir.join(MANIFEST_FILE));

        let tools_path = env::var("DOTNET_BUILDPACK_TOOLS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| buildpack_dir.join(TOOLS_FILE));

        let package_cache_dir = env::var("NUGET_PACKAGES_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let publish_release = env_flag("PUBLISH_RELEASE_CONFIG");

        let log_level = env::var("DOTNET_BUILDPACK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env_flag("DOTNET_BUILDPACK_LOG_JSON");

        Self {
            buildpack_dir,
            manifest_path,
            tools_path,
            package_cache_dir,
            publish_release,
            log_level,
            log_json,
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
        .unwrap_or(false)
}

impl BuildpackConfig {
    /// Configuration rooted at an explicit buildpack directory, ignoring the
    /// catalog path overrides
    pub fn with_buildpack_dir(dir: impl Into<PathBuf>) -> Self {
        let buildpack_dir = dir.into();
        Self {
            manifest_path: buildpack_dir.join(MANIFEST_FILE),
            tools_path: buildpack_dir.join(TOOLS_FILE),
            buildpack_dir,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if let Some(dir) = &self.package_cache_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::ParseError {
                    field: "NUGET_PACKAGES_DIR".to_string(),
                    error: "empty path".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Both catalog files must exist before anything is resolved
    pub fn validate_catalogs(&self, fs: &dyn FileSystem) -> Result<(), ConfigError> {
        for path in [&self.manifest_path, &self.tools_path] {
            if !fs.is_file(path) {
                return Err(ConfigError::MissingCatalog(path.clone()));
            }
        }
        Ok(())
    }

    pub fn load_catalog(&self, fs: &dyn FileSystem) -> Result<Catalog, ResolveError> {
        Catalog::load(fs, &self.manifest_path, &self.tools_path)
    }

    pub fn package_cache_dir(&self, app_root: &Path) -> PathBuf {
        self.package_cache_dir
            .clone()
            .unwrap_or_else(|| app_root.join(DEFAULT_PACKAGE_CACHE))
    }

    pub fn publish_configuration(&self) -> PublishConfiguration {
        PublishConfiguration::from_release_flag(self.publish_release)
    }
}

impl fmt::Display for BuildpackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Buildpack Configuration:")?;
        writeln!(f, "  Manifest: {}", self.manifest_path.display())?;
        writeln!(f, "  SDK Tools: {}", self.tools_path.display())?;
        match &self.package_cache_dir {
            Some(dir) => writeln!(f, "  Package Cache: {}", dir.display())?,
            None => writeln!(f, "  Package Cache: <app>/{}", DEFAULT_PACKAGE_CACHE)?,
        }
        writeln!(f, "  Publish Configuration: {}", self.publish_configuration().as_str())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
