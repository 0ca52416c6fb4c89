//! Release step: the web process start command

use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::project::{is_msbuild_project_file, ProjectPath, PublishedAppDetector, PUBLISH_DIR};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const SERVER_URLS: &str = "--server.urls http://0.0.0.0:${PORT}";

#[derive(Debug, Serialize)]
struct Release {
    default_process_types: BTreeMap<&'static str, String>,
}

/// Start command for the web process, `None` when there is nothing to run
pub fn start_command(
    fs: &dyn FileSystem,
    app_root: &Path,
    main_project: Option<&ProjectPath>,
) -> Result<Option<String>, ResolveError> {
    if let Some(published) = PublishedAppDetector::new(fs).published_project(app_root)? {
        let dir = if published.is_at_root() {
            app_root.to_path_buf()
        } else {
            app_root.join(&published.dir)
        };
        let runner = if fs.is_file(&dir.join(&published.name)) {
            format!("./{}", published.name)
        } else {
            format!("dotnet {}.dll", published.name)
        };
        debug!(project = %published.name, "Starting published application");

        let command = if published.is_at_root() {
            format!("{} {}", runner, SERVER_URLS)
        } else {
            format!("cd {} && {} {}", published.dir.display(), runner, SERVER_URLS)
        };
        return Ok(Some(command));
    }

    let Some(name) = main_project.and_then(|project| assembly_name(app_root, project)) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "cd {} && dotnet {}.dll {}",
        PUBLISH_DIR, name, SERVER_URLS
    )))
}

/// Assembly a project builds: the file stem of an MSBuild project file, the
/// directory name of a project.json project
fn assembly_name(app_root: &Path, project: &ProjectPath) -> Option<String> {
    let name = if project.file_name().is_some_and(is_msbuild_project_file) {
        project.file_stem()
    } else if project.is_root() {
        app_root.file_name().and_then(|n| n.to_str())
    } else {
        project.file_name()
    };
    name.map(str::to_string)
}

pub fn release_yaml(start_command: &str) -> Result<String, serde_yaml::Error> {
    let release = Release {
        default_process_types: BTreeMap::from([("web", start_command.to_string())]),
    };
    serde_yaml::to_string(&release)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn start(fs: &MockFileSystem, project: Option<&str>) -> Option<String> {
        let project = project.map(|p| ProjectPath::parse(p).unwrap());
        start_command(fs, Path::new("/mock"), project.as_ref()).unwrap()
    }

    #[test]
    fn test_self_contained_publish_at_root() {
        let fs = MockFileSystem::new();
        fs.add_file("web.runtimeconfig.json", "{}");
        fs.add_file("web", "");

        assert_eq!(
            start(&fs, None).unwrap(),
            "./web --server.urls http://0.0.0.0:${PORT}"
        );
    }

    #[test]
    fn test_portable_publish_at_root() {
        let fs = MockFileSystem::new();
        fs.add_file("web.runtimeconfig.json", "{}");
        fs.add_file("web.dll", "");

        assert_eq!(
            start(&fs, None).unwrap(),
            "dotnet web.dll --server.urls http://0.0.0.0:${PORT}"
        );
    }

    #[test]
    fn test_publish_dir_output() {
        let fs = MockFileSystem::new();
        fs.add_file(".cloudfoundry/dotnet_publish/web.runtimeconfig.json", "{}");
        fs.add_file(".cloudfoundry/dotnet_publish/web.dll", "");

        assert_eq!(
            start(&fs, Some("src/web/web.csproj")).unwrap(),
            "cd .cloudfoundry/dotnet_publish && dotnet web.dll --server.urls http://0.0.0.0:${PORT}"
        );
    }

    #[test]
    fn test_source_msbuild_project() {
        let fs = MockFileSystem::new();
        fs.add_file("src/api/Api.csproj", "<Project />");

        assert_eq!(
            start(&fs, Some("src/api/Api.csproj")).unwrap(),
            "cd .cloudfoundry/dotnet_publish && dotnet Api.dll --server.urls http://0.0.0.0:${PORT}"
        );
    }

    #[test]
    fn test_source_project_json_project() {
        let fs = MockFileSystem::new();
        fs.add_file("src/frontend/project.json", "{}");

        let command = start(&fs, Some("src/frontend")).unwrap();
        assert!(command.contains("dotnet frontend.dll"));
    }

    #[test]
    fn test_project_json_at_root_uses_app_dir_name() {
        let fs = MockFileSystem::new();
        fs.add_file("project.json", "{}");

        let command = start(&fs, Some(".")).unwrap();
        assert!(command.contains("dotnet mock.dll"));
    }

    #[test]
    fn test_nothing_to_start() {
        let fs = MockFileSystem::new();
        assert_eq!(start(&fs, None), None);
    }

    #[test]
    fn test_release_yaml() {
        let yaml = release_yaml("dotnet web.dll --server.urls http://0.0.0.0:${PORT}").unwrap();
        assert!(yaml.starts_with("default_process_types:\n  web: "));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed["default_process_types"]["web"].as_str(),
            Some("dotnet web.dll --server.urls http://0.0.0.0:${PORT}")
        );
    }
}
