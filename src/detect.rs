//! Buildpack detection: does this look like a .NET Core application?

use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::project::{PublishedAppDetector, ProjectScanner};
use std::path::Path;
use tracing::debug;

/// Name printed by the detect step when the application is accepted
pub const BUILDPACK_NAME: &str = "dotnet-core";

/// True for published applications and for sources with at least one
/// project.json or MSBuild project file
pub fn detect(fs: &dyn FileSystem, app_root: &Path) -> Result<bool, ResolveError> {
    if let Some(published) = PublishedAppDetector::new(fs).published_project(app_root)? {
        debug!(project = %published.name, "Detected published application");
        return Ok(true);
    }

    let scanner = ProjectScanner::new(fs);
    if !scanner.msbuild_projects(app_root)?.is_empty() {
        return Ok(true);
    }
    Ok(!scanner.project_json_dirs(app_root)?.is_empty())
}
