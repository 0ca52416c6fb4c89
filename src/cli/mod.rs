pub mod commands;
pub mod output;

pub use commands::{AppArgs, CliArgs, Commands, FrameworksArgs, OutputFormatArg, PlanArgs};
pub use output::{OutputFormat, OutputFormatter};
