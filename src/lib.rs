//! dotnet-buildpack - version resolution and project detection for .NET Core apps
//!
//! This library is the decision engine of a Cloud Foundry buildpack for .NET
//! Core applications. It looks at an application directory and answers the
//! questions staging needs answered before anything is downloaded:
//!
//! - Is this a .NET Core application at all, and was it already published?
//! - Which .NET Core SDK should be installed?
//! - Is the app written for project.json or MSBuild tooling?
//! - Which project is the main one?
//! - Which runtime (shared framework) versions does it need?
//!
//! # Example Usage
//!
//! ```no_run
//! use dotnet_buildpack::{BuildPlanner, BuildpackConfig, LoggingHandler, RealFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildpackConfig::default();
//! let fs = RealFileSystem;
//! let catalog = config.load_catalog(&fs)?;
//! let progress = LoggingHandler;
//!
//! let plan = BuildPlanner::new(&fs, &catalog, &progress)
//!     .with_configuration(config.publish_configuration())
//!     .plan(Path::new("/tmp/app"))?;
//!
//! println!("SDK: {:?}", plan.sdk_version);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`project`]: project discovery, `.deployment` pins, main project selection
//! - [`sdk`]: tooling dialects and SDK version resolution
//! - [`runtime`]: runtime framework version resolution
//! - [`plan`]: everything above composed into a [`BuildPlan`]

pub mod catalog;
pub mod cli;
pub mod command;
pub mod config;
pub mod detect;
pub mod error;
pub mod fs;
pub mod installer;
pub mod plan;
pub mod progress;
pub mod project;
pub mod release;
pub mod runtime;
pub mod sdk;
pub mod util;
pub mod version;

pub use catalog::{Catalog, Manifest, ToolsCompatibility};
pub use command::{CommandSpec, PublishConfiguration};
pub use config::{BuildpackConfig, ConfigError};
pub use detect::{detect, BUILDPACK_NAME};
pub use error::ResolveError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use installer::{InstallContext, InstallerKind, InstallerRegistry};
pub use plan::{BuildPlan, BuildPlanner};
pub use progress::{
    ConsoleHandler, LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler, RecordingHandler,
};
pub use project::{ProjectPath, ProjectResolver, PublishedAppDetector};
pub use runtime::FrameworkVersionResolver;
pub use sdk::{
    InstalledSdkClassifier, PinnedSdkClassifier, SdkVersionResolver, ToolingClassifier,
    ToolingDialect,
};
pub use version::{compare_versions, DottedVersion};

/// Version of the dotnet-buildpack library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the dotnet-buildpack library
pub const NAME: &str = env!("CARGO_PKG_NAME");
