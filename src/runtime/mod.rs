//! .NET Core runtime (shared framework) version resolution

pub mod framework;

pub use framework::{
    framework_package_name, latest_per_line, runtime_framework_versions,
    FrameworkVersionResolver, FRAMEWORK_PACKAGE_MSBUILD, FRAMEWORK_PACKAGE_PROJECT_JSON,
};
