//! Main project selection

use super::{DeploymentConfigReader, ProjectPath, ProjectScanner};
use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::sdk::{ToolingClassifier, ToolingDialect};
use std::path::Path;
use tracing::{debug, info};

/// Extensions of project files a project.json-era pin may name instead of
/// the project directory
const LEGACY_PIN_EXTENSIONS: [&str; 2] = ["xproj", "csproj"];

pub struct ProjectResolver<'a> {
    fs: &'a dyn FileSystem,
    classifier: &'a dyn ToolingClassifier,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, classifier: &'a dyn ToolingClassifier) -> Self {
        Self { fs, classifier }
    }

    /// MSBuild when the classifier recognizes it, project.json otherwise
    pub fn dialect(&self, app_root: &Path) -> Result<ToolingDialect, ResolveError> {
        if self.classifier.is_msbuild(app_root)? {
            Ok(ToolingDialect::MsBuild)
        } else {
            Ok(ToolingDialect::ProjectJson)
        }
    }

    /// The project to restore and publish
    ///
    /// A lone project wins regardless of `.deployment`. With several, the
    /// `.deployment` pin decides, and a pin that matches none of them yields
    /// `None`.
    pub fn main_project_path(&self, app_root: &Path) -> Result<Option<ProjectPath>, ResolveError> {
        let dialect = self.dialect(app_root)?;
        let projects = ProjectScanner::new(self.fs).scan(app_root, dialect)?;

        if projects.is_empty() {
            debug!(%dialect, "No projects found");
            return Ok(None);
        }

        if let Some(only) = projects.single() {
            info!(project = %only, "Found single project");
            return Ok(Some(only.clone()));
        }

        let Some(pin) = DeploymentConfigReader::new(self.fs).read_pin(app_root)? else {
            return Err(ResolveError::AmbiguousProject {
                descriptor: dialect.descriptor(),
                candidates: projects.iter().map(ToString::to_string).collect(),
            });
        };

        match normalize_pin(&pin, dialect) {
            Some(path) if projects.contains(&path) => {
                info!(project = %path, "Using project from .deployment");
                Ok(Some(path))
            }
            _ => {
                debug!(pin = %pin, "Pinned project is not among the discovered projects");
                Ok(None)
            }
        }
    }
}

/// Normalize a `.deployment` pin into a project path comparable with the
/// scanner's output
pub fn normalize_pin(raw: &str, dialect: ToolingDialect) -> Option<ProjectPath> {
    let path = ProjectPath::parse(raw)?;
    match dialect {
        ToolingDialect::ProjectJson
            if path
                .extension()
                .is_some_and(|ext| LEGACY_PIN_EXTENSIONS.contains(&ext)) =>
        {
            Some(path.parent())
        }
        _ => Some(path),
    }
}
