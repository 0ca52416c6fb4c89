//! Detection of already-published applications
//!
//! `dotnet publish` leaves a `<Project>.runtimeconfig.json` next to the
//! entry assembly. Finding exactly one at the app root, or in the directory
//! the buildpack publishes into, means there is nothing left to build.

use crate::error::ResolveError;
use crate::fs::{is_hidden_name, FileSystem};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const RUNTIMECONFIG_SUFFIX: &str = ".runtimeconfig.json";

/// Where the buildpack publishes the main project, relative to the app root
pub const PUBLISH_DIR: &str = ".cloudfoundry/dotnet_publish";

/// `*.runtimeconfig.json` files directly inside `dir`; a missing directory
/// has none
pub fn find_runtime_configs(
    fs: &dyn FileSystem,
    dir: &Path,
) -> Result<Vec<PathBuf>, ResolveError> {
    if !fs.is_dir(dir) {
        return Ok(Vec::new());
    }

    Ok(fs
        .read_dir(dir)?
        .into_iter()
        .filter(|entry| entry.is_file() && !is_hidden_name(entry.file_name()))
        .filter(|entry| entry.file_name().ends_with(RUNTIMECONFIG_SUFFIX))
        .map(|entry| entry.path)
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedProject {
    /// File stem of the runtimeconfig, e.g. `MyApp`
    pub name: String,
    /// Directory holding the published output, relative to the app root
    /// (empty when published at the root)
    pub dir: PathBuf,
}

impl PublishedProject {
    pub fn is_at_root(&self) -> bool {
        self.dir.as_os_str().is_empty()
    }
}

pub struct PublishedAppDetector<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> PublishedAppDetector<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn published_project(
        &self,
        app_root: &Path,
    ) -> Result<Option<PublishedProject>, ResolveError> {
        for dir in [PathBuf::new(), PathBuf::from(PUBLISH_DIR)] {
            let location = if dir.as_os_str().is_empty() {
                app_root.to_path_buf()
            } else {
                app_root.join(&dir)
            };
            if let Some(name) = self.single_project_in(&location)? {
                return Ok(Some(PublishedProject { name, dir }));
            }
        }
        Ok(None)
    }

    pub fn published_project_name(&self, app_root: &Path) -> Result<Option<String>, ResolveError> {
        Ok(self.published_project(app_root)?.map(|p| p.name))
    }

    fn single_project_in(&self, dir: &Path) -> Result<Option<String>, ResolveError> {
        let configs = find_runtime_configs(self.fs, dir)?;
        let [config] = configs.as_slice() else {
            return Ok(None);
        };

        Ok(config
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(RUNTIMECONFIG_SUFFIX))
            .map(str::to_string))
    }
}
