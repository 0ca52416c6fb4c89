//! Bundled version catalogs
//!
//! `manifest.yml` declares the dependencies the buildpack can install and the
//! default version of each. `dotnet-sdk-tools.yml` records which SDK versions
//! ship project.json tooling and which ship MSBuild tooling.

use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::sdk::ToolingDialect;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.yml";
pub const TOOLS_FILE: &str = "dotnet-sdk-tools.yml";

/// Manifest dependency name of the SDK
pub const SDK_DEPENDENCY: &str = "dotnet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultVersion {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cf_stacks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub default_versions: Vec<DefaultVersion>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ResolveError> {
        serde_yaml::from_str(content).map_err(|source| ResolveError::InvalidCatalog {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ResolveError> {
        let content = fs.read_to_string(path)?;
        Self::from_yaml(&content, path)
    }

    pub fn default_version(&self, name: &str) -> Option<&str> {
        self.default_versions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.version.as_str())
    }

    /// Versions of a dependency in declaration order
    pub fn versions(&self, name: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|d| d.name == name)
            .map(|d| d.version.as_str())
            .collect()
    }
}

/// SDK versions grouped by the project tooling they ship with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsCompatibility {
    #[serde(default)]
    pub project_json: Vec<String>,
    #[serde(default)]
    pub msbuild: Vec<String>,
}

impl ToolsCompatibility {
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ResolveError> {
        serde_yaml::from_str(content).map_err(|source| ResolveError::InvalidCatalog {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ResolveError> {
        let content = fs.read_to_string(path)?;
        Self::from_yaml(&content, path)
    }

    pub fn versions(&self, dialect: ToolingDialect) -> &[String] {
        match dialect {
            ToolingDialect::ProjectJson => &self.project_json,
            ToolingDialect::MsBuild => &self.msbuild,
        }
    }

    pub fn supports(&self, dialect: ToolingDialect, sdk_version: &str) -> bool {
        self.versions(dialect).iter().any(|v| v == sdk_version)
    }

    /// The dialect an SDK version belongs to, if it is catalogued at all
    pub fn dialect_of(&self, sdk_version: &str) -> Option<ToolingDialect> {
        ToolingDialect::all()
            .iter()
            .copied()
            .find(|d| self.supports(*d, sdk_version))
    }

    /// Last declared entry for a dialect
    pub fn latest(&self, dialect: ToolingDialect) -> Option<&str> {
        self.versions(dialect).last().map(String::as_str)
    }
}

/// Both catalogs, loaded together
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub manifest: Manifest,
    pub tools: ToolsCompatibility,
}

impl Catalog {
    pub fn load(
        fs: &dyn FileSystem,
        manifest_path: &Path,
        tools_path: &Path,
    ) -> Result<Self, ResolveError> {
        Ok(Self {
            manifest: Manifest::load(fs, manifest_path)?,
            tools: ToolsCompatibility::load(fs, tools_path)?,
        })
    }
}
