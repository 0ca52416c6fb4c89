//! CLI integration tests
//!
//! Exercise the binary end to end: argument parsing, exit codes and what
//! lands on stdout for each subcommand.

mod support;

use std::process::{Command, Output};
use support::{buildpack_dir, TestApp, MSBUILD_PROJECT, PROJECT_JSON};

fn dotnet_buildpack() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dotnet-buildpack"));
    command
        .env_remove("DOTNET_BUILDPACK_MANIFEST")
        .env_remove("DOTNET_BUILDPACK_TOOLS")
        .env_remove("NUGET_PACKAGES_DIR")
        .env_remove("PUBLISH_RELEASE_CONFIG")
        .env("DOTNET_BUILDPACK_DIR", buildpack_dir());
    command
}

fn run(args: &[&str]) -> Output {
    dotnet_buildpack()
        .args(args)
        .output()
        .expect("Failed to execute dotnet-buildpack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn path(app: &TestApp) -> &str {
    app.root().to_str().expect("temp path is UTF-8")
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("frameworks"));
    assert!(stdout.contains("release"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("dotnet-buildpack"));
}

#[test]
fn test_detect_accepts_msbuild_app() {
    let app = TestApp::new().with_file("src/app/app.csproj", MSBUILD_PROJECT);
    let output = run(&["detect", path(&app)]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "dotnet-core");
}

#[test]
fn test_detect_rejects_other_app() {
    let app = TestApp::new().with_file("package.json", "{}");
    let output = run(&["detect", path(&app)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_detect_missing_directory() {
    let output = run(&["detect", "/definitely/not/here"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_plan_json() {
    let app = TestApp::new()
        .with_file("src/web/web.csproj", MSBUILD_PROJECT)
        .with_file("src/lib/lib.csproj", MSBUILD_PROJECT)
        .with_file(".deployment", "[config]\nproject = src/web/web.csproj\n");

    let output = run(&["plan", path(&app), "--format", "json", "--release"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let plan: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(plan["sdk_version"], "1.0.4");
    assert_eq!(plan["dialect"], "msbuild");
    assert_eq!(plan["main_project"], "src/web/web.csproj");
    assert_eq!(plan["commands"][1]["args"][0], "publish");
    assert_eq!(plan["commands"][1]["args"][5], "Release");
}

#[test]
fn test_plan_human_shows_deprecation_warning() {
    let app = TestApp::new().with_file("project.json", PROJECT_JSON);

    let output = run(&["plan", path(&app)]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    assert!(stdout.contains("WARNING: Support for project.json"));
    assert!(stdout.contains("SDK Version:   1.0.0-preview2-003156"));
}

#[test]
fn test_plan_ambiguous_projects_fails() {
    let app = TestApp::new()
        .with_file("a/a.csproj", MSBUILD_PROJECT)
        .with_file("b/b.csproj", MSBUILD_PROJECT);

    let output = run(&["plan", path(&app), "--format", "yaml"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_plan_missing_catalogs() {
    let app = TestApp::new().with_file("app.csproj", MSBUILD_PROJECT);
    let empty = TestApp::new();

    let output = run(&["plan", path(&app), "--buildpack-dir", path(&empty)]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_frameworks_from_package_cache() {
    let app = TestApp::new()
        .with_file("src/app/app.csproj", MSBUILD_PROJECT)
        .with_dir(".nuget/packages/microsoft.netcore.app/1.1.1")
        .with_dir(".nuget/packages/microsoft.netcore.app/1.1.2");

    let output = run(&["frameworks", path(&app), "--sdk-version", "1.0.4", "-f", "json"]);
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["framework_versions"], serde_json::json!(["1.1.2"]));
}

#[test]
fn test_frameworks_requires_installed_sdk() {
    let app = TestApp::new().with_file("src/app/app.csproj", MSBUILD_PROJECT);

    let output = run(&["frameworks", path(&app)]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_release_for_published_app() {
    let app = TestApp::new()
        .with_file("web.runtimeconfig.json", "{}")
        .with_file("web.dll", "");

    let output = run(&["release", path(&app)]);
    assert!(output.status.success());

    let release: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        release["default_process_types"]["web"].as_str(),
        Some("dotnet web.dll --server.urls http://0.0.0.0:${PORT}")
    );
}

#[test]
fn test_release_for_source_app() {
    let app = TestApp::new().with_file("src/Api/Api.csproj", MSBUILD_PROJECT);

    let output = run(&["release", path(&app)]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("dotnet Api.dll"));
}
