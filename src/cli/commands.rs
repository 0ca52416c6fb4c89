use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Version resolution and project detection for .NET Core applications
#[derive(Parser, Debug)]
#[command(
    name = "dotnet-buildpack",
    about = "Version resolution and project detection for .NET Core applications",
    version,
    author,
    long_about = "dotnet-buildpack inspects a .NET Core application the way the Cloud Foundry \
                  buildpack does during staging: it detects the app, resolves the SDK and \
                  runtime versions to install, selects the main project and describes the \
                  restore, publish and start commands."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Check whether an application is a .NET Core app",
        long_about = "Prints 'dotnet-core' and exits 0 when the application contains a \
                      project.json, an MSBuild project file or a published runtimeconfig. \
                      Exits 1 otherwise.\n\n\
                      Examples:\n  \
                      dotnet-buildpack detect /tmp/app"
    )]
    Detect(AppArgs),

    #[command(
        about = "Resolve everything needed to build an application",
        long_about = "Resolves the SDK version, tooling dialect, main project, installers and \
                      the restore/publish/start commands without executing anything.\n\n\
                      Examples:\n  \
                      dotnet-buildpack plan /tmp/app\n  \
                      dotnet-buildpack plan /tmp/app --format json\n  \
                      dotnet-buildpack plan /tmp/app --buildpack-dir /buildpack --release"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Resolve the .NET Core runtime versions to install",
        long_about = "Reads a published runtimeconfig, or the framework packages restored into \
                      the NuGet cache, and prints the runtime versions the application needs.\n\n\
                      Examples:\n  \
                      dotnet-buildpack frameworks /tmp/app\n  \
                      dotnet-buildpack frameworks /tmp/app --package-cache /tmp/nuget --sdk-version 1.0.1"
    )]
    Frameworks(FrameworksArgs),

    #[command(
        about = "Print the release YAML with the web start command",
        long_about = "Examples:\n  dotnet-buildpack release /tmp/app"
    )]
    Release(AppArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AppArgs {
    #[arg(value_name = "APP", help = "Path to the application directory")]
    pub app_path: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory holding manifest.yml and dotnet-sdk-tools.yml"
    )]
    pub buildpack_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub app: AppArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "DIR", help = "NuGet cache root (defaults to <APP>/.nuget)")]
    pub package_cache: Option<PathBuf>,

    #[arg(long, help = "Publish with the Release configuration")]
    pub release: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FrameworksArgs {
    #[command(flatten)]
    pub app: AppArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "DIR", help = "NuGet cache root (defaults to <APP>/.nuget)")]
    pub package_cache: Option<PathBuf>,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Classify tooling by this SDK version instead of the installed SDK"
    )]
    pub sdk_version: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
