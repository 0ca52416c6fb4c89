//! Shared helpers for integration tests

#![allow(dead_code)]

use dotnet_buildpack::{BuildpackConfig, Catalog, RealFileSystem};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An application tree in a temporary directory
pub struct TestApp {
    dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    pub fn with_dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.root().join(rel)).expect("Failed to create directory");
        self
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Repository root, where the bundled catalogs live
pub fn buildpack_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The catalogs shipped with the buildpack
pub fn bundled_catalog() -> Catalog {
    BuildpackConfig::with_buildpack_dir(buildpack_dir())
        .load_catalog(&RealFileSystem)
        .expect("Failed to load bundled catalogs")
}

pub const MSBUILD_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>netcoreapp1.1</TargetFramework>
  </PropertyGroup>
</Project>
"#;

pub const PROJECT_JSON: &str = r#"{
  "dependencies": {
    "Microsoft.NETCore.App": { "version": "1.0.0", "type": "platform" }
  },
  "frameworks": { "netcoreapp1.0": {} }
}
"#;
