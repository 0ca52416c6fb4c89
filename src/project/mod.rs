//! Project topology: which projects exist and which one is the main one

pub mod deployment;
pub mod path;
pub mod published;
pub mod resolver;
pub mod scanner;

pub use deployment::{DeploymentConfigReader, DEPLOYMENT_FILE};
pub use path::ProjectPath;
pub use published::{
    find_runtime_configs, PublishedAppDetector, PublishedProject, PUBLISH_DIR,
    RUNTIMECONFIG_SUFFIX,
};
pub use resolver::{normalize_pin, ProjectResolver};
pub use scanner::{
    is_msbuild_project_file, ProjectScanner, ProjectSet, MSBUILD_EXTENSIONS, PROJECT_JSON,
};
