use dotnet_buildpack::cli::{
    AppArgs, CliArgs, Commands, FrameworksArgs, OutputFormat, OutputFormatter, PlanArgs,
};
use dotnet_buildpack::project::{ProjectResolver, PublishedAppDetector};
use dotnet_buildpack::release::{release_yaml, start_command};
use dotnet_buildpack::util::logging::{init_logging, parse_level, LoggingConfig};
use dotnet_buildpack::{
    detect, BuildPlanner, BuildpackConfig, Catalog, ConsoleHandler, FrameworkVersionResolver,
    InstalledSdkClassifier, LoggingHandler, PinnedSdkClassifier, ProgressHandler, RealFileSystem,
    ResolveError, SdkVersionResolver, ToolingClassifier, BUILDPACK_NAME, VERSION,
};

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("dotnet-buildpack v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(app_args) => handle_detect(app_args),
        Commands::Plan(plan_args) => handle_plan(plan_args),
        Commands::Frameworks(frameworks_args) => handle_frameworks(frameworks_args),
        Commands::Release(app_args) => handle_release(app_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_buildpack_config(&BuildpackConfig::default());

    if let Some(level_str) = &args.log_level {
        match parse_level(level_str) {
            Some(level) => config.level = level,
            None => eprintln!(
                "Invalid log level '{}', defaulting to {}. Valid levels: trace, debug, info, warn, error",
                level_str, config.level
            ),
        }
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}

fn handle_detect(args: &AppArgs) -> i32 {
    let Some(app_root) = resolve_app_path(&args.app_path) else {
        return 1;
    };

    match detect(&RealFileSystem, &app_root) {
        Ok(true) => {
            println!("{}", BUILDPACK_NAME);
            0
        }
        Ok(false) => {
            debug!("No .NET Core project found in {}", app_root.display());
            1
        }
        Err(e) => {
            error!("Detection failed: {}", e);
            1
        }
    }
}

fn handle_plan(args: &PlanArgs) -> i32 {
    let Some(app_root) = resolve_app_path(&args.app.app_path) else {
        return 1;
    };
    let Some(mut config) = load_config(&args.app) else {
        return 1;
    };
    if args.package_cache.is_some() {
        config.package_cache_dir = args.package_cache.clone();
    }
    config.publish_release |= args.release;

    let fs = RealFileSystem;
    let Some(catalog) = load_catalog(&config, &fs) else {
        return 1;
    };

    let format = OutputFormat::from(args.format);
    let progress = progress_for(format);

    let plan = BuildPlanner::new(&fs, &catalog, progress.as_ref())
        .with_package_cache_dir(config.package_cache_dir(&app_root))
        .with_configuration(config.publish_configuration())
        .plan(&app_root);

    match plan {
        Ok(plan) => print_output(OutputFormatter::new(format).format_plan(&plan)),
        Err(e) => report(e),
    }
}

fn handle_frameworks(args: &FrameworksArgs) -> i32 {
    let Some(app_root) = resolve_app_path(&args.app.app_path) else {
        return 1;
    };
    let Some(config) = load_config(&args.app) else {
        return 1;
    };

    let fs = RealFileSystem;
    let Some(catalog) = load_catalog(&config, &fs) else {
        return 1;
    };

    let classifier: Box<dyn ToolingClassifier + '_> = match &args.sdk_version {
        Some(version) => Box::new(PinnedSdkClassifier::new(version.as_str(), &catalog.tools)),
        None => Box::new(InstalledSdkClassifier::new(&fs, &catalog.tools)),
    };

    let package_cache = args
        .package_cache
        .clone()
        .unwrap_or_else(|| config.package_cache_dir(&app_root));

    let format = OutputFormat::from(args.format);
    let progress = progress_for(format);

    match FrameworkVersionResolver::new(&fs, classifier.as_ref(), progress.as_ref())
        .resolve(&app_root, &package_cache)
    {
        Ok(versions) => print_output(OutputFormatter::new(format).format_frameworks(&versions)),
        Err(e) => report(e),
    }
}

fn handle_release(args: &AppArgs) -> i32 {
    let Some(app_root) = resolve_app_path(&args.app_path) else {
        return 1;
    };

    let fs = RealFileSystem;
    let command = match PublishedAppDetector::new(&fs).published_project(&app_root) {
        Ok(Some(_)) => start_command(&fs, &app_root, None),
        Ok(None) => {
            let Some(config) = load_config(args) else {
                return 1;
            };
            let Some(catalog) = load_catalog(&config, &fs) else {
                return 1;
            };
            source_start_command(&fs, &catalog, &app_root)
        }
        Err(e) => Err(e),
    };

    match command {
        Ok(Some(command)) => {
            info!(command = %command, "Web process start command");
            match release_yaml(&command) {
                Ok(yaml) => {
                    print!("{}", yaml);
                    0
                }
                Err(e) => {
                    error!("Failed to render release YAML: {}", e);
                    1
                }
            }
        }
        Ok(None) => {
            error!("No project found to start in {}", app_root.display());
            1
        }
        Err(e) => report(e),
    }
}

fn source_start_command(
    fs: &RealFileSystem,
    catalog: &Catalog,
    app_root: &Path,
) -> Result<Option<String>, ResolveError> {
    let progress = LoggingHandler;
    let sdk_version = SdkVersionResolver::new(fs, catalog, &progress).resolve(app_root)?;
    let classifier = PinnedSdkClassifier::new(sdk_version, &catalog.tools);
    let main_project = ProjectResolver::new(fs, &classifier).main_project_path(app_root)?;
    start_command(fs, app_root, main_project.as_ref())
}

fn resolve_app_path(path: &Path) -> Option<PathBuf> {
    debug!("Application path: {}", path.display());

    if !path.is_dir() {
        error!("Application path is not a directory: {}", path.display());
        return None;
    }

    match path.canonicalize() {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Failed to canonicalize application path: {}", e);
            None
        }
    }
}

fn load_config(args: &AppArgs) -> Option<BuildpackConfig> {
    let config = match &args.buildpack_dir {
        Some(dir) => BuildpackConfig::with_buildpack_dir(dir),
        None => BuildpackConfig::default(),
    };

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return None;
    }
    debug!("{}", config);
    Some(config)
}

fn load_catalog(config: &BuildpackConfig, fs: &RealFileSystem) -> Option<Catalog> {
    if let Err(e) = config.validate_catalogs(fs) {
        error!("Configuration error: {}", e);
        return None;
    }

    match config.load_catalog(fs) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

/// Human output shares stdout with staging-style progress lines; machine
/// formats keep stdout clean and route progress to the log
fn progress_for(format: OutputFormat) -> Box<dyn ProgressHandler> {
    if format.is_machine_readable() {
        Box::new(LoggingHandler)
    } else {
        Box::new(ConsoleHandler::stdout())
    }
}

fn print_output(output: anyhow::Result<String>) -> i32 {
    match output {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn report(e: ResolveError) -> i32 {
    if e.is_deployment_config_error() {
        error!("{} (check the .deployment file at the application root)", e);
    } else {
        error!("{}", e);
    }
    1
}
