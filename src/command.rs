//! `dotnet` invocations as data
//!
//! Commands are a program plus an argument list and environment, so paths
//! with spaces need no quoting and nothing is handed to a shell.

use crate::project::{ProjectPath, PUBLISH_DIR};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DOTNET: &str = "dotnet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PublishConfiguration {
    Release,
    Debug,
}

impl PublishConfiguration {
    pub fn from_release_flag(release: bool) -> Self {
        if release {
            PublishConfiguration::Release
        } else {
            PublishConfiguration::Debug
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishConfiguration::Release => "Release",
            PublishConfiguration::Debug => "Debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub current_dir: PathBuf,
}

impl CommandSpec {
    fn dotnet(app_root: &Path, package_cache_dir: &Path) -> Self {
        let mut env = BTreeMap::new();
        env.insert("DOTNET_SKIP_FIRST_TIME_EXPERIENCE".to_string(), "true".to_string());
        env.insert("DOTNET_CLI_TELEMETRY_OPTOUT".to_string(), "true".to_string());
        env.insert(
            "NUGET_PACKAGES".to_string(),
            package_cache_dir.join("packages").display().to_string(),
        );

        Self {
            program: DOTNET.to_string(),
            args: Vec::new(),
            env,
            current_dir: app_root.to_path_buf(),
        }
    }

    /// `dotnet restore`, scoped to the main project when there is one
    pub fn restore(
        app_root: &Path,
        project: Option<&ProjectPath>,
        package_cache_dir: &Path,
    ) -> Self {
        let mut spec = Self::dotnet(app_root, package_cache_dir);
        spec.args.push("restore".to_string());
        if let Some(project) = project {
            spec.args.push(project.under(app_root).display().to_string());
        }
        spec.args.extend(["--verbosity".to_string(), "minimal".to_string()]);
        spec
    }

    /// `dotnet publish` of the main project into the publish directory
    pub fn publish(
        app_root: &Path,
        project: &ProjectPath,
        package_cache_dir: &Path,
        configuration: PublishConfiguration,
    ) -> Self {
        let mut spec = Self::dotnet(app_root, package_cache_dir);
        spec.args.extend([
            "publish".to_string(),
            project.under(app_root).display().to_string(),
            "-o".to_string(),
            app_root.join(PUBLISH_DIR).display().to_string(),
            "-c".to_string(),
            configuration.as_str().to_string(),
        ]);
        spec
    }

    /// Single-line rendering for logs; not meant to be fed to a shell
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.env)
            .current_dir(&self.current_dir);
        command
    }
}
