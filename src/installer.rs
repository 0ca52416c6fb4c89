//! Installer registry
//!
//! The buildpack installs a fixed set of dependencies in a fixed order. Each
//! one decides from an [`InstallContext`] whether the application needs it.

use crate::catalog::{Manifest, SDK_DEPENDENCY};
use crate::error::ResolveError;
use crate::fs::{strip_bom, FileSystem};
use crate::project::{ProjectScanner, PublishedAppDetector, PROJECT_JSON};
use regex::Regex;
use roxmltree::Document;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerKind {
    DotnetSdk,
    DotnetFramework,
    Node,
    Bower,
}

impl InstallerKind {
    pub fn name(&self) -> &'static str {
        match self {
            InstallerKind::DotnetSdk => ".NET Core SDK",
            InstallerKind::DotnetFramework => ".NET Core runtime",
            InstallerKind::Node => "Node.js",
            InstallerKind::Bower => "Bower",
        }
    }

    /// Manifest dependency the installer downloads
    pub fn dependency(&self) -> &'static str {
        match self {
            InstallerKind::DotnetSdk => SDK_DEPENDENCY,
            InstallerKind::DotnetFramework => "dotnet-framework",
            InstallerKind::Node => "node",
            InstallerKind::Bower => "bower",
        }
    }

    /// Directory under the buildpack cache that holds the download
    pub fn cache_dir(&self) -> &'static str {
        match self {
            InstallerKind::DotnetSdk => "dotnet-sdk",
            InstallerKind::DotnetFramework => "dotnet-framework",
            InstallerKind::Node => "node",
            InstallerKind::Bower => "bower",
        }
    }

    pub fn should_install(&self, ctx: &InstallContext) -> bool {
        match self {
            InstallerKind::DotnetSdk => !ctx.published,
            InstallerKind::DotnetFramework => true,
            InstallerKind::Node => {
                !ctx.published && (ctx.invokes(npm_pattern()) || ctx.invokes(bower_pattern()))
            }
            InstallerKind::Bower => !ctx.published && ctx.invokes(bower_pattern()),
        }
    }

    /// Manifest default version, when one is declared
    pub fn default_version<'m>(&self, manifest: &'m Manifest) -> Option<&'m str> {
        manifest.default_version(self.dependency())
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What installers look at when deciding whether they apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallContext {
    pub published: bool,
    /// project.json `scripts` entries and MSBuild `Exec` commands
    pub script_commands: Vec<String>,
}

impl InstallContext {
    pub fn gather(fs: &dyn FileSystem, app_root: &Path) -> Result<Self, ResolveError> {
        if PublishedAppDetector::new(fs)
            .published_project(app_root)?
            .is_some()
        {
            return Ok(Self {
                published: true,
                script_commands: Vec::new(),
            });
        }

        let scanner = ProjectScanner::new(fs);
        let mut script_commands = Vec::new();

        for dir in scanner.project_json_dirs(app_root)? {
            let path = dir.under(app_root).join(PROJECT_JSON);
            let content = fs.read_to_string(&path)?;
            let json: Value = serde_json::from_str(strip_bom(&content))
                .map_err(|source| ResolveError::MalformedDescriptor { path, source })?;
            script_commands.extend(project_json_scripts(&json));
        }

        for project in scanner.msbuild_projects(app_root)? {
            let path = project.under(app_root);
            let content = fs.read_to_string(&path)?;
            let commands = msbuild_exec_commands(strip_bom(&content))
                .map_err(|source| ResolveError::MalformedProjectFile { path, source })?;
            script_commands.extend(commands);
        }

        debug!(count = script_commands.len(), "Collected build scripts");
        Ok(Self {
            published: false,
            script_commands,
        })
    }

    fn invokes(&self, pattern: &Regex) -> bool {
        self.script_commands.iter().any(|cmd| pattern.is_match(cmd))
    }
}

/// Installers in install order
#[derive(Debug, Clone)]
pub struct InstallerRegistry {
    installers: Vec<InstallerKind>,
}

impl InstallerRegistry {
    pub fn with_defaults() -> Self {
        Self {
            installers: vec![
                InstallerKind::DotnetSdk,
                InstallerKind::DotnetFramework,
                InstallerKind::Node,
                InstallerKind::Bower,
            ],
        }
    }

    pub fn all(&self) -> &[InstallerKind] {
        &self.installers
    }

    pub fn applicable(&self, ctx: &InstallContext) -> Vec<InstallerKind> {
        self.installers
            .iter()
            .copied()
            .filter(|installer| installer.should_install(ctx))
            .collect()
    }
}

impl Default for InstallerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn npm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bnpm\b").expect("static pattern"))
}

fn bower_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bbower\b").expect("static pattern"))
}

/// `scripts` values are either a command or a list of commands
fn project_json_scripts(json: &Value) -> Vec<String> {
    let Some(scripts) = json.get("scripts").and_then(Value::as_object) else {
        return Vec::new();
    };

    scripts
        .values()
        .flat_map(|value| match value {
            Value::String(cmd) => vec![cmd.clone()],
            Value::Array(cmds) => cmds
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

fn msbuild_exec_commands(project_xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = Document::parse(project_xml)?;
    Ok(doc
        .descendants()
        .filter(|node| node.has_tag_name("Exec"))
        .filter_map(|node| node.attribute("Command"))
        .map(str::to_string)
        .collect())
}
