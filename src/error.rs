use crate::sdk::ToolingDialect;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the resolution engine
///
/// Every variant is fatal to the call that produced it. Recoverable problems
/// (an unparseable `global.json`, for instance) are reported as warnings
/// through the progress channel instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid .deployment file: must have project key")]
    MissingProjectKey,

    #[error("Invalid .deployment file: must only contain one project key")]
    DuplicateProjectKey,

    #[error("Multiple paths contain a {descriptor}, but no .deployment file was used")]
    AmbiguousProject {
        descriptor: &'static str,
        candidates: Vec<String>,
    },

    #[error(
        "Found both project.json and MSBuild project files (project.json: {}; MSBuild: {}). \
         Add a global.json that pins the .NET Core SDK version to use",
        project_json.join(", "),
        msbuild.join(", ")
    )]
    MixedTooling {
        project_json: Vec<String>,
        msbuild: Vec<String>,
    },

    #[error("File {} is not valid JSON: {source}", path.display())]
    MalformedDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File {} is not a valid project file: {source}", path.display())]
    MalformedProjectFile {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Unable to determine .NET Core runtime version(s) to install")]
    UnresolvableFrameworkVersion,

    #[error(
        "The .NET Core SDK has not been installed yet: {} does not exist",
        marker.display()
    )]
    SdkNotInstalled { marker: PathBuf },

    #[error("Manifest declares no default version for '{0}'")]
    NoDefaultSdkVersion(String),

    #[error("SDK tools table lists no {0} versions")]
    EmptyToolsList(ToolingDialect),

    #[error("Failed to parse {}: {source}", path.display())]
    InvalidCatalog {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),
}

impl ResolveError {
    /// `.deployment` problems the user fixes by editing that file
    pub fn is_deployment_config_error(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingProjectKey | ResolveError::DuplicateProjectKey
        )
    }
}
