//! Project discovery
//!
//! Walks the application tree and collects candidate projects for each
//! tooling dialect. Hidden directories (`.git`, `.cloudfoundry`, `.nuget`,
//! ...) are never entered.

use super::ProjectPath;
use crate::error::ResolveError;
use crate::fs::{is_hidden_name, FileSystem};
use crate::sdk::ToolingDialect;
use std::path::{Component, Path};
use tracing::debug;

pub const PROJECT_JSON: &str = "project.json";
pub const MSBUILD_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "vbproj"];

/// Candidate projects found under one dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSet {
    pub dialect: ToolingDialect,
    pub members: Vec<ProjectPath>,
}

impl ProjectSet {
    pub fn contains(&self, path: &ProjectPath) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn single(&self) -> Option<&ProjectPath> {
        match self.members.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectPath> {
        self.members.iter()
    }
}

pub fn is_msbuild_project_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MSBUILD_EXTENSIONS.contains(&ext))
}

fn is_visible(rel: &Path) -> bool {
    rel.components().all(|c| match c {
        Component::Normal(segment) => !is_hidden_name(&segment.to_string_lossy()),
        _ => false,
    })
}

pub struct ProjectScanner<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectScanner<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Every `*.csproj`, `*.fsproj` and `*.vbproj` file
    pub fn msbuild_projects(&self, app_root: &Path) -> Result<Vec<ProjectPath>, ResolveError> {
        let projects = self.collect(app_root, |name| {
            is_msbuild_project_file(name).then_some(false)
        })?;
        debug!(count = projects.len(), "Found MSBuild project files");
        Ok(projects)
    }

    /// Every directory containing a `project.json`
    pub fn project_json_dirs(&self, app_root: &Path) -> Result<Vec<ProjectPath>, ResolveError> {
        let projects = self.collect(app_root, |name| (name == PROJECT_JSON).then_some(true))?;
        debug!(count = projects.len(), "Found project.json directories");
        Ok(projects)
    }

    pub fn scan(
        &self,
        app_root: &Path,
        dialect: ToolingDialect,
    ) -> Result<ProjectSet, ResolveError> {
        let members = match dialect {
            ToolingDialect::ProjectJson => self.project_json_dirs(app_root)?,
            ToolingDialect::MsBuild => self.msbuild_projects(app_root)?,
        };
        Ok(ProjectSet { dialect, members })
    }

    /// `select` decides per file name whether it is a match, and whether the
    /// match is reported as its containing directory (`Some(true)`) or as the
    /// file itself (`Some(false)`).
    fn collect(
        &self,
        app_root: &Path,
        select: impl Fn(&str) -> Option<bool>,
    ) -> Result<Vec<ProjectPath>, ResolveError> {
        let mut found = Vec::new();

        for entry in self.fs.walk(app_root)? {
            if !entry.is_file() {
                continue;
            }
            let Some(use_parent) = select(entry.file_name()) else {
                continue;
            };
            let Ok(rel) = entry.path().strip_prefix(app_root) else {
                continue;
            };
            if !is_visible(rel) {
                continue;
            }
            if let Some(path) = ProjectPath::from_relative(rel) {
                found.push(if use_parent { path.parent() } else { path });
            }
        }

        found.sort();
        found.dedup();
        Ok(found)
    }
}
