//! Tooling dialect predicates
//!
//! Resolvers ask an injected [`ToolingClassifier`] which dialect applies
//! instead of inspecting SDK state themselves.

use super::ToolingDialect;
use crate::catalog::ToolsCompatibility;
use crate::error::ResolveError;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// Version file the SDK installer writes next to the SDK it unpacked
pub const SDK_VERSION_MARKER: &str = ".dotnet/VERSION";

pub trait ToolingClassifier {
    fn is_project_json(&self, app_root: &Path) -> Result<bool, ResolveError>;

    fn is_msbuild(&self, app_root: &Path) -> Result<bool, ResolveError>;

    /// `None` when the SDK version is in neither list of the tools table
    fn dialect(&self, app_root: &Path) -> Result<Option<ToolingDialect>, ResolveError> {
        if self.is_msbuild(app_root)? {
            Ok(Some(ToolingDialect::MsBuild))
        } else if self.is_project_json(app_root)? {
            Ok(Some(ToolingDialect::ProjectJson))
        } else {
            Ok(None)
        }
    }
}

/// Classifies by the SDK already installed into the application
pub struct InstalledSdkClassifier<'a> {
    fs: &'a dyn FileSystem,
    tools: &'a ToolsCompatibility,
}

impl<'a> InstalledSdkClassifier<'a> {
    pub fn new(fs: &'a dyn FileSystem, tools: &'a ToolsCompatibility) -> Self {
        Self { fs, tools }
    }

    pub fn installed_version(&self, app_root: &Path) -> Result<String, ResolveError> {
        let marker = app_root.join(SDK_VERSION_MARKER);
        if !self.fs.is_file(&marker) {
            return Err(ResolveError::SdkNotInstalled { marker });
        }

        let version = self.fs.read_to_string(&marker)?.trim().to_string();
        debug!(version = %version, "Read installed SDK version");
        Ok(version)
    }
}

impl ToolingClassifier for InstalledSdkClassifier<'_> {
    fn is_project_json(&self, app_root: &Path) -> Result<bool, ResolveError> {
        let version = self.installed_version(app_root)?;
        Ok(self.tools.supports(ToolingDialect::ProjectJson, &version))
    }

    fn is_msbuild(&self, app_root: &Path) -> Result<bool, ResolveError> {
        let version = self.installed_version(app_root)?;
        Ok(self.tools.supports(ToolingDialect::MsBuild, &version))
    }
}

/// Classifies by an SDK version that was resolved but not installed yet
pub struct PinnedSdkClassifier<'a> {
    version: String,
    tools: &'a ToolsCompatibility,
}

impl<'a> PinnedSdkClassifier<'a> {
    pub fn new(version: impl Into<String>, tools: &'a ToolsCompatibility) -> Self {
        Self {
            version: version.into(),
            tools,
        }
    }
}

impl ToolingClassifier for PinnedSdkClassifier<'_> {
    fn is_project_json(&self, _app_root: &Path) -> Result<bool, ResolveError> {
        Ok(self.tools.supports(ToolingDialect::ProjectJson, &self.version))
    }

    fn is_msbuild(&self, _app_root: &Path) -> Result<bool, ResolveError> {
        Ok(self.tools.supports(ToolingDialect::MsBuild, &self.version))
    }
}
