//! Resolution behavior against real application trees on disk

mod support;

use dotnet_buildpack::project::ProjectScanner;
use dotnet_buildpack::{
    FrameworkVersionResolver, InstalledSdkClassifier, PinnedSdkClassifier, ProjectPath, ProjectResolver,
    RealFileSystem, RecordingHandler, ResolveError, SdkVersionResolver, ToolingDialect,
};
use support::{bundled_catalog, TestApp, MSBUILD_PROJECT, PROJECT_JSON};

const PROJECT_JSON_SDK: &str = "1.0.0-preview2-003156";
const LATEST_MSBUILD_SDK: &str = "1.0.4";

fn main_project(app: &TestApp, sdk: &str) -> Result<Option<ProjectPath>, ResolveError> {
    let catalog = bundled_catalog();
    let classifier = PinnedSdkClassifier::new(sdk, &catalog.tools);
    ProjectResolver::new(&RealFileSystem, &classifier).main_project_path(app.root())
}

fn resolve_sdk(app: &TestApp) -> (Result<String, ResolveError>, RecordingHandler) {
    let catalog = bundled_catalog();
    let progress = RecordingHandler::new();
    let result = SdkVersionResolver::new(&RealFileSystem, &catalog, &progress).resolve(app.root());
    (result, progress)
}

#[test]
fn test_hidden_directories_are_never_scanned() {
    let app = TestApp::new()
        .with_file("src/app/app.csproj", MSBUILD_PROJECT)
        .with_file(".git/hooks/project.json", PROJECT_JSON)
        .with_file("src/.vs/old/old.csproj", MSBUILD_PROJECT)
        .with_file(".cloudfoundry/tmp/tmp.csproj", MSBUILD_PROJECT);

    let scanner = ProjectScanner::new(&RealFileSystem);
    let projects = scanner.msbuild_projects(app.root()).unwrap();
    assert_eq!(projects, vec![ProjectPath::parse("src/app/app.csproj").unwrap()]);
    assert!(scanner.project_json_dirs(app.root()).unwrap().is_empty());
}

#[test]
fn test_ambiguous_project_json_without_deployment() {
    let app = TestApp::new()
        .with_file("src/proj1/project.json", PROJECT_JSON)
        .with_file("src/proj2/project.json", PROJECT_JSON);

    let err = main_project(&app, PROJECT_JSON_SDK).unwrap_err();
    assert!(matches!(err, ResolveError::AmbiguousProject { .. }));
    assert_eq!(
        err.to_string(),
        "Multiple paths contain a project.json file, but no .deployment file was used"
    );
}

#[test]
fn test_deployment_pin_selects_project() {
    let app = TestApp::new()
        .with_file("src/proj1/project.json", PROJECT_JSON)
        .with_file("src/proj2/project.json", PROJECT_JSON)
        .with_file(".deployment", "[config]\nproject = src/proj2\n");

    assert_eq!(
        main_project(&app, PROJECT_JSON_SDK).unwrap(),
        ProjectPath::parse("src/proj2")
    );

    app.write(".deployment", "[config]\nproject = ./src/proj2/\n");
    assert_eq!(
        main_project(&app, PROJECT_JSON_SDK).unwrap(),
        ProjectPath::parse("src/proj2")
    );
}

#[test]
fn test_deployment_with_bom() {
    let app = TestApp::new()
        .with_file("src/a/a.csproj", MSBUILD_PROJECT)
        .with_file("src/b/b.csproj", MSBUILD_PROJECT)
        .with_file(".deployment", "\u{feff}[config]\r\nproject = src/b/b.csproj\r\n");

    assert_eq!(
        main_project(&app, LATEST_MSBUILD_SDK).unwrap(),
        ProjectPath::parse("src/b/b.csproj")
    );
}

#[test]
fn test_duplicate_project_keys() {
    let app = TestApp::new()
        .with_file("src/a/a.csproj", MSBUILD_PROJECT)
        .with_file("src/b/b.csproj", MSBUILD_PROJECT)
        .with_file(
            ".deployment",
            "[config]\nproject = src/a/a.csproj\nproject = src/b/b.csproj\n",
        );

    let err = main_project(&app, LATEST_MSBUILD_SDK).unwrap_err();
    assert!(err.is_deployment_config_error());
    assert_eq!(
        err.to_string(),
        "Invalid .deployment file: must only contain one project key"
    );
}

#[test]
fn test_msbuild_only_uses_latest_msbuild_sdk() {
    let app = TestApp::new().with_file("src/app/app.csproj", MSBUILD_PROJECT);

    let (result, progress) = resolve_sdk(&app);
    assert_eq!(result.unwrap(), LATEST_MSBUILD_SDK);
    assert!(progress.warnings().is_empty());
}

#[test]
fn test_project_json_only_uses_default_sdk() {
    let app = TestApp::new().with_file("src/app/project.json", PROJECT_JSON);

    let (result, progress) = resolve_sdk(&app);
    assert_eq!(result.unwrap(), PROJECT_JSON_SDK);

    let warnings = progress.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("project.json"));
    assert!(warnings[0].contains("deprecated"));
}

#[test]
fn test_mixed_tooling_at_root() {
    let app = TestApp::new()
        .with_file("app.csproj", MSBUILD_PROJECT)
        .with_file("project.json", PROJECT_JSON);

    let (result, progress) = resolve_sdk(&app);
    match result.unwrap_err() {
        ResolveError::MixedTooling {
            project_json,
            msbuild,
        } => {
            assert_eq!(project_json, vec!["."]);
            assert_eq!(msbuild, vec!["app.csproj"]);
        }
        other => panic!("Expected MixedTooling, got {:?}", other),
    }
    assert_eq!(progress.warnings().len(), 1);
}

#[test]
fn test_global_json_pin_with_bom_is_verbatim() {
    let app = TestApp::new()
        .with_file("app.csproj", MSBUILD_PROJECT)
        .with_file("project.json", PROJECT_JSON)
        .with_file("global.json", "\u{feff}{ \"sdk\": { \"version\": \"7.7.7-custom\" } }");

    let (result, progress) = resolve_sdk(&app);
    assert_eq!(result.unwrap(), "7.7.7-custom");
    assert!(progress.warnings().is_empty());
}

#[test]
fn test_runtime_config_framework_version() {
    let app = TestApp::new().with_file(
        "testapp.runtimeconfig.json",
        r#"{"runtimeOptions":{"framework":{"name":"X","version":"1.0.0"}}}"#,
    );

    let catalog = bundled_catalog();
    let classifier = PinnedSdkClassifier::new(LATEST_MSBUILD_SDK, &catalog.tools);
    let progress = RecordingHandler::new();
    let versions = FrameworkVersionResolver::new(&RealFileSystem, &classifier, &progress)
        .resolve(app.root(), &app.root().join(".nuget"))
        .unwrap();

    assert_eq!(versions, vec!["1.0.0"]);
    assert_eq!(
        progress.infos(),
        vec!["Detected .NET Core runtime version 1.0.0 in testapp.runtimeconfig.json"]
    );
}

#[test]
fn test_highest_restored_version_per_line() {
    let app = TestApp::new()
        .with_file("src/app/app.csproj", MSBUILD_PROJECT)
        .with_dir(".nuget/packages/microsoft.netcore.app/1.0.1")
        .with_dir(".nuget/packages/microsoft.netcore.app/1.0.9")
        .with_dir(".nuget/packages/microsoft.netcore.app/1.1.0");

    let catalog = bundled_catalog();
    let classifier = PinnedSdkClassifier::new(LATEST_MSBUILD_SDK, &catalog.tools);
    let progress = RecordingHandler::new();
    let versions = FrameworkVersionResolver::new(&RealFileSystem, &classifier, &progress)
        .resolve(app.root(), &app.root().join(".nuget"))
        .unwrap();

    assert_eq!(versions, vec!["1.0.9", "1.1.0"]);
}

#[test]
fn test_sdk_outside_tools_table_still_scans_restored_packages() {
    let app = TestApp::new()
        .with_file("src/app/app.csproj", MSBUILD_PROJECT)
        .with_file("global.json", r#"{"sdk":{"version":"2.0.0"}}"#)
        .with_file(".dotnet/VERSION", "2.0.0\n")
        .with_dir(".nuget/packages/Microsoft.NETCore.App/1.1.2")
        .with_dir(".nuget/packages/microsoft.netcore.app/1.1.2");

    let (sdk, _) = resolve_sdk(&app);
    assert_eq!(sdk.unwrap(), "2.0.0");

    let catalog = bundled_catalog();
    let classifier = InstalledSdkClassifier::new(&RealFileSystem, &catalog.tools);
    let progress = RecordingHandler::new();
    let versions = FrameworkVersionResolver::new(&RealFileSystem, &classifier, &progress)
        .resolve(app.root(), &app.root().join(".nuget"))
        .unwrap();

    assert_eq!(versions, vec!["1.1.2"]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_project_file_is_a_candidate() {
    let app = TestApp::new().with_file("real/app.csproj", MSBUILD_PROJECT);
    std::fs::create_dir_all(app.root().join("src")).unwrap();
    std::os::unix::fs::symlink(
        app.root().join("real/app.csproj"),
        app.root().join("src/link.csproj"),
    )
    .unwrap();

    let projects = ProjectScanner::new(&RealFileSystem)
        .msbuild_projects(app.root())
        .unwrap();
    assert_eq!(
        projects,
        vec![
            ProjectPath::parse("real/app.csproj").unwrap(),
            ProjectPath::parse("src/link.csproj").unwrap(),
        ]
    );
}

#[test]
fn test_bundled_catalogs_are_consistent() {
    let catalog = bundled_catalog();
    let default = catalog.manifest.default_version("dotnet").unwrap();

    assert_eq!(
        catalog.tools.dialect_of(default),
        Some(ToolingDialect::ProjectJson)
    );
    for version in catalog.tools.versions(ToolingDialect::MsBuild) {
        assert!(!catalog.tools.supports(ToolingDialect::ProjectJson, version));
    }
}
