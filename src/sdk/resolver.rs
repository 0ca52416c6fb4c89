//! SDK version resolution
//!
//! Priority order:
//! 1. `global.json` `sdk.version`, taken verbatim
//! 2. the tooling the app's project files imply
//! 3. the manifest default
//!
//! Whatever wins, a project.json-era SDK triggers the deprecation warning.

use super::ToolingDialect;
use crate::catalog::{Catalog, SDK_DEPENDENCY};
use crate::error::ResolveError;
use crate::fs::{strip_bom, FileSystem};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::project::{ProjectPath, ProjectScanner};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

pub const GLOBAL_JSON: &str = "global.json";

const PROJECT_JSON_DEPRECATION: &str = "Support for project.json in the .NET Core buildpack will \
    be deprecated. Please migrate the application to MSBuild project files \
    (*.csproj, *.fsproj or *.vbproj).";

pub struct SdkVersionResolver<'a> {
    fs: &'a dyn FileSystem,
    catalog: &'a Catalog,
    progress: &'a dyn ProgressHandler,
}

impl<'a> SdkVersionResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        catalog: &'a Catalog,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            fs,
            catalog,
            progress,
        }
    }

    pub fn resolve(&self, app_root: &Path) -> Result<String, ResolveError> {
        let version = match self.pinned_version(app_root)? {
            Some(version) => {
                info!(version = %version, "Using SDK version pinned in global.json");
                version
            }
            None => self.version_for_tooling(app_root)?,
        };

        if self
            .catalog
            .tools
            .supports(ToolingDialect::ProjectJson, &version)
        {
            self.progress
                .on_progress(&ProgressEvent::warning(PROJECT_JSON_DEPRECATION));
        }

        Ok(version)
    }

    /// `sdk.version` from `global.json`. Unreadable pins are reported and
    /// ignored.
    pub fn pinned_version(&self, app_root: &Path) -> Result<Option<String>, ResolveError> {
        let path = app_root.join(GLOBAL_JSON);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let content = self.fs.read_to_string(&path)?;
        let version = serde_json::from_str::<Value>(strip_bom(&content))
            .ok()
            .and_then(|json| json.get("sdk")?.get("version")?.as_str().map(str::to_string));

        if version.is_none() {
            self.progress.on_progress(&ProgressEvent::warning(format!(
                "File {} is not valid JSON",
                path.display()
            )));
        }
        Ok(version)
    }

    fn version_for_tooling(&self, app_root: &Path) -> Result<String, ResolveError> {
        let scanner = ProjectScanner::new(self.fs);
        let project_json = scanner.project_json_dirs(app_root)?;
        let msbuild = scanner.msbuild_projects(app_root)?;

        match (project_json.is_empty(), msbuild.is_empty()) {
            (false, false) => {
                self.progress
                    .on_progress(&ProgressEvent::warning(mixed_tooling_warning(
                        &project_json,
                        &msbuild,
                    )));
                Err(ResolveError::MixedTooling {
                    project_json: project_json.iter().map(ToString::to_string).collect(),
                    msbuild: msbuild.iter().map(ToString::to_string).collect(),
                })
            }
            (true, false) => {
                let version = self
                    .catalog
                    .tools
                    .latest(ToolingDialect::MsBuild)
                    .ok_or(ResolveError::EmptyToolsList(ToolingDialect::MsBuild))?;
                debug!(version, "MSBuild project files found, using latest MSBuild SDK");
                Ok(version.to_string())
            }
            _ => {
                let version = self
                    .catalog
                    .manifest
                    .default_version(SDK_DEPENDENCY)
                    .ok_or_else(|| ResolveError::NoDefaultSdkVersion(SDK_DEPENDENCY.to_string()))?;
                debug!(version, "Using manifest default SDK version");
                Ok(version.to_string())
            }
        }
    }
}

fn mixed_tooling_warning(project_json: &[ProjectPath], msbuild: &[ProjectPath]) -> String {
    let mut lines = vec!["Found both project.json and MSBuild project files.".to_string()];

    lines.push("project.json directories:".to_string());
    lines.extend(project_json.iter().map(|p| format!("  {}", p)));

    lines.push("MSBuild project files:".to_string());
    lines.extend(msbuild.iter().map(|p| format!("  {}", p)));

    lines.push(format!(
        "Add a {} file to the root of the application to select the .NET Core SDK version.",
        GLOBAL_JSON
    ));
    lines.join("\n")
}
