//! Build planning
//!
//! Runs every resolution step for one application and collects the outcome
//! into a [`BuildPlan`]: what to install, which SDK, which project, and the
//! commands that build and start it. Nothing is downloaded or executed.

use crate::catalog::Catalog;
use crate::command::{CommandSpec, PublishConfiguration};
use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::installer::{InstallContext, InstallerKind, InstallerRegistry};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::project::{ProjectPath, ProjectResolver, PublishedAppDetector, PublishedProject};
use crate::release;
use crate::sdk::{PinnedSdkClassifier, SdkVersionResolver, ToolingClassifier, ToolingDialect};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub app_root: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<PublishedProject>,
    /// Not resolved for published applications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<ToolingDialect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_project: Option<ProjectPath>,
    pub installers: Vec<InstallerKind>,
    pub commands: Vec<CommandSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
}

impl BuildPlan {
    pub fn is_published(&self) -> bool {
        self.published.is_some()
    }
}

pub struct BuildPlanner<'a> {
    fs: &'a dyn FileSystem,
    catalog: &'a Catalog,
    progress: &'a dyn ProgressHandler,
    registry: InstallerRegistry,
    package_cache_dir: Option<PathBuf>,
    configuration: PublishConfiguration,
}

impl<'a> BuildPlanner<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        catalog: &'a Catalog,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            fs,
            catalog,
            progress,
            registry: InstallerRegistry::with_defaults(),
            package_cache_dir: None,
            configuration: PublishConfiguration::Debug,
        }
    }

    /// NuGet cache root; `<app>/.nuget` when unset
    pub fn with_package_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.package_cache_dir = Some(dir.into());
        self
    }

    pub fn with_configuration(mut self, configuration: PublishConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn plan(&self, app_root: &Path) -> Result<BuildPlan, ResolveError> {
        let published = PublishedAppDetector::new(self.fs).published_project(app_root)?;

        let mut plan = BuildPlan {
            app_root: app_root.to_path_buf(),
            published: published.clone(),
            sdk_version: None,
            dialect: None,
            main_project: None,
            installers: Vec::new(),
            commands: Vec::new(),
            start_command: None,
        };

        if let Some(published) = &published {
            self.progress.on_progress(&ProgressEvent::step(format!(
                "Found published application {}",
                published.name
            )));
        } else {
            self.plan_source_build(app_root, &mut plan)?;
        }

        let ctx = InstallContext::gather(self.fs, app_root)?;
        plan.installers = self.registry.applicable(&ctx);
        plan.start_command =
            release::start_command(self.fs, app_root, plan.main_project.as_ref())?;

        info!(
            installers = plan.installers.len(),
            commands = plan.commands.len(),
            "Build plan ready"
        );
        Ok(plan)
    }

    fn plan_source_build(&self, app_root: &Path, plan: &mut BuildPlan) -> Result<(), ResolveError> {
        let sdk_version = SdkVersionResolver::new(self.fs, self.catalog, self.progress)
            .resolve(app_root)?;
        self.progress.on_progress(&ProgressEvent::step(format!(
            "Using .NET Core SDK {}",
            sdk_version
        )));

        let classifier = PinnedSdkClassifier::new(sdk_version.as_str(), &self.catalog.tools);
        plan.dialect = classifier.dialect(app_root)?;

        let main_project = ProjectResolver::new(self.fs, &classifier).main_project_path(app_root)?;
        let cache_dir = self
            .package_cache_dir
            .clone()
            .unwrap_or_else(|| app_root.join(".nuget"));

        plan.commands
            .push(CommandSpec::restore(app_root, main_project.as_ref(), &cache_dir));
        match &main_project {
            Some(project) => {
                self.progress.on_progress(&ProgressEvent::info(format!(
                    "Main project: {}",
                    project
                )));
                plan.commands.push(CommandSpec::publish(
                    app_root,
                    project,
                    &cache_dir,
                    self.configuration,
                ));
            }
            None => self
                .progress
                .on_progress(&ProgressEvent::warning("No main project found to publish")),
        }

        plan.sdk_version = Some(sdk_version);
        plan.main_project = main_project;
        Ok(())
    }
}
