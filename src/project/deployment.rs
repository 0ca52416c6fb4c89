//! `.deployment` file support
//!
//! ```ini
//! [config]
//! project = src/MyApp
//! ```
//!
//! The file is optional. When present it must name exactly one project.

use crate::error::ResolveError;
use crate::fs::{strip_bom, FileSystem};
use std::path::Path;
use tracing::debug;

pub const DEPLOYMENT_FILE: &str = ".deployment";

const CONFIG_SECTION: &str = "config";
const PROJECT_KEY: &str = "project";

pub struct DeploymentConfigReader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DeploymentConfigReader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// The raw `project` value, or `None` when there is no `.deployment` file
    pub fn read_pin(&self, app_root: &Path) -> Result<Option<String>, ResolveError> {
        let path = app_root.join(DEPLOYMENT_FILE);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let content = self.fs.read_to_string(&path)?;
        let project = parse_deployment(&content)?;
        debug!(project = %project, "Read project from .deployment");
        Ok(Some(project))
    }
}

/// Extract the single `project` key of the `[config]` section
pub fn parse_deployment(content: &str) -> Result<String, ResolveError> {
    let mut section: Option<&str> = None;
    let mut projects = Vec::new();

    for line in strip_bom(content).lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name.trim());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if section == Some(CONFIG_SECTION) && key.trim() == PROJECT_KEY {
            projects.push(unquote(value.trim()).to_string());
        }
    }

    match projects.len() {
        0 => Err(ResolveError::MissingProjectKey),
        1 => Ok(projects.remove(0)),
        _ => Err(ResolveError::DuplicateProjectKey),
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
