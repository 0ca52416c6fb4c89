//! .NET Core SDK selection
//!
//! Which SDK gets installed decides which project tooling the build uses:
//! early SDK previews understand `project.json`, later ones MSBuild project
//! files. The tools table in `dotnet-sdk-tools.yml` maps SDK versions to the
//! tooling they ship.

pub mod classifier;
pub mod dialect;
pub mod resolver;

pub use classifier::{
    InstalledSdkClassifier, PinnedSdkClassifier, ToolingClassifier, SDK_VERSION_MARKER,
};
pub use dialect::ToolingDialect;
pub use resolver::{SdkVersionResolver, GLOBAL_JSON};
