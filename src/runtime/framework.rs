//! Which .NET Core runtime versions an application needs
//!
//! A published application states its runtime in the single
//! `*.runtimeconfig.json` at its root. A source application is restored
//! first; the framework packages `dotnet restore` pulled into the NuGet cache,
//! plus any `RuntimeFrameworkVersion` an MSBuild project pins, are the
//! versions to install.

use crate::error::ResolveError;
use crate::fs::{strip_bom, FileSystem};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::project::{find_runtime_configs, ProjectScanner};
use crate::sdk::{ToolingClassifier, ToolingDialect};
use crate::version::{sort_unique, DottedVersion};
use roxmltree::Document;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// NuGet lower-cases package directories for MSBuild restores
pub const FRAMEWORK_PACKAGE_MSBUILD: &str = "microsoft.netcore.app";
pub const FRAMEWORK_PACKAGE_PROJECT_JSON: &str = "Microsoft.NETCore.App";

const PACKAGES_DIR: &str = "packages";
const RUNTIME_FRAMEWORK_VERSION: &str = "RuntimeFrameworkVersion";

pub fn framework_package_name(dialect: ToolingDialect) -> &'static str {
    match dialect {
        ToolingDialect::MsBuild => FRAMEWORK_PACKAGE_MSBUILD,
        ToolingDialect::ProjectJson => FRAMEWORK_PACKAGE_PROJECT_JSON,
    }
}

pub struct FrameworkVersionResolver<'a> {
    fs: &'a dyn FileSystem,
    classifier: &'a dyn ToolingClassifier,
    progress: &'a dyn ProgressHandler,
}

impl<'a> FrameworkVersionResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        classifier: &'a dyn ToolingClassifier,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            fs,
            classifier,
            progress,
        }
    }

    pub fn resolve(
        &self,
        app_root: &Path,
        package_cache_dir: &Path,
    ) -> Result<Vec<String>, ResolveError> {
        let configs = find_runtime_configs(self.fs, app_root)?;
        if let [config] = configs.as_slice() {
            return self.from_runtime_config(config);
        }

        // an SDK outside the tools table restores like project.json tooling
        let dialect = if self.classifier.is_msbuild(app_root)? {
            ToolingDialect::MsBuild
        } else {
            ToolingDialect::ProjectJson
        };

        let mut versions = self.restored_versions(package_cache_dir, dialect)?;
        if dialect == ToolingDialect::MsBuild {
            versions.extend(self.pinned_versions(app_root)?);
        }

        let versions = sort_unique(versions);
        if versions.is_empty() {
            return Err(ResolveError::UnresolvableFrameworkVersion);
        }

        self.progress.on_progress(&ProgressEvent::info(format!(
            "Detected .NET Core runtime version(s) {} required according to 'dotnet restore'",
            versions.join(", ")
        )));
        Ok(versions)
    }

    fn from_runtime_config(&self, path: &Path) -> Result<Vec<String>, ResolveError> {
        let content = self.fs.read_to_string(path)?;
        let json: Value = serde_json::from_str(strip_bom(&content)).map_err(|source| {
            ResolveError::MalformedDescriptor {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let name = json
            .pointer("/runtimeOptions/framework/name")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty());
        let version = json
            .pointer("/runtimeOptions/framework/version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty());
        let (Some(name), Some(version)) = (name, version) else {
            debug!(path = %path.display(), "runtimeconfig names no framework and version");
            return Ok(Vec::new());
        };
        debug!(framework = name, version, "Framework from runtimeconfig");

        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.progress.on_progress(&ProgressEvent::info(format!(
            "Detected .NET Core runtime version {} in {}",
            version, file
        )));
        Ok(vec![version.to_string()])
    }

    /// Highest restored framework package of each `major.minor` line
    fn restored_versions(
        &self,
        package_cache_dir: &Path,
        dialect: ToolingDialect,
    ) -> Result<Vec<String>, ResolveError> {
        let package_dir = package_cache_dir
            .join(PACKAGES_DIR)
            .join(framework_package_name(dialect));
        if !self.fs.is_dir(&package_dir) {
            debug!(dir = %package_dir.display(), "No restored framework packages");
            return Ok(Vec::new());
        }

        let restored: Vec<String> = self
            .fs
            .read_dir(&package_dir)?
            .into_iter()
            .filter(|entry| entry.is_dir())
            .map(|entry| entry.file_name().to_string())
            .collect();
        debug!(?restored, "Restored framework packages");

        Ok(latest_per_line(restored))
    }

    fn pinned_versions(&self, app_root: &Path) -> Result<Vec<String>, ResolveError> {
        let mut versions = Vec::new();
        for project in ProjectScanner::new(self.fs).msbuild_projects(app_root)? {
            let path = project.under(app_root);
            let content = self.fs.read_to_string(&path)?;
            let pinned = runtime_framework_versions(strip_bom(&content))
                .map_err(|source| ResolveError::MalformedProjectFile { path, source })?;
            if !pinned.is_empty() {
                debug!(project = %project, ?pinned, "Project pins runtime framework version");
            }
            versions.extend(pinned);
        }
        Ok(versions)
    }
}

/// Keep only the highest version of every `major.minor` line
pub fn latest_per_line(versions: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut lines: BTreeMap<String, DottedVersion> = BTreeMap::new();
    for raw in versions {
        let version = DottedVersion::parse(&raw);
        match lines.get(&version.line()) {
            Some(current) if *current >= version => {}
            _ => {
                lines.insert(version.line(), version);
            }
        }
    }
    lines.into_values().map(|v| v.to_string()).collect()
}

/// `RuntimeFrameworkVersion` values under `/Project/PropertyGroup`
pub fn runtime_framework_versions(project_xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = Document::parse(project_xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("Project") {
        return Ok(Vec::new());
    }

    Ok(root
        .children()
        .filter(|node| node.has_tag_name("PropertyGroup"))
        .flat_map(|group| group.children())
        .filter(|node| node.has_tag_name(RUNTIME_FRAMEWORK_VERSION))
        .filter_map(|node| node.text())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect())
}
