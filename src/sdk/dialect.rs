use serde::{Deserialize, Serialize};
use std::fmt;

/// Project tooling convention an application is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolingDialect {
    /// One `project.json` descriptor per project directory (deprecated)
    #[serde(rename = "project_json")]
    ProjectJson,
    /// `*.csproj`, `*.fsproj` and `*.vbproj` project files
    #[serde(rename = "msbuild")]
    MsBuild,
}

impl ToolingDialect {
    pub fn all() -> &'static [ToolingDialect] {
        &[ToolingDialect::ProjectJson, ToolingDialect::MsBuild]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolingDialect::ProjectJson => "project.json",
            ToolingDialect::MsBuild => "MSBuild",
        }
    }

    /// How a single project of this dialect is referred to in messages
    pub fn descriptor(&self) -> &'static str {
        match self {
            ToolingDialect::ProjectJson => "project.json file",
            ToolingDialect::MsBuild => "project file",
        }
    }
}

impl fmt::Display for ToolingDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
