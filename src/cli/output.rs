//! Output formatting for plans and runtime version lists
//!
//! JSON and YAML are meant for tooling; the human format mirrors the tree
//! layout of the staging log.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::plan::BuildPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

impl OutputFormat {
    pub fn is_machine_readable(&self) -> bool {
        !matches!(self, OutputFormat::Human)
    }
}

#[derive(Serialize)]
struct FrameworkVersions<'a> {
    framework_versions: &'a [String],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_plan(&self, plan: &BuildPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize build plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize build plan to YAML")
            }
            OutputFormat::Human => Ok(Self::format_plan_human(plan)),
        }
    }

    pub fn format_frameworks(&self, versions: &[String]) -> Result<String> {
        let doc = FrameworkVersions {
            framework_versions: versions,
        };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&doc)
                .context("Failed to serialize framework versions to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&doc)
                .context("Failed to serialize framework versions to YAML"),
            OutputFormat::Human => Ok(versions.join("\n")),
        }
    }

    fn format_plan_human(plan: &BuildPlan) -> String {
        let mut output = String::new();

        output.push_str(".NET Core Build Plan\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str(&format!("Application:   {}\n", plan.app_root.display()));
        match &plan.published {
            Some(published) => {
                output.push_str(&format!("Published:     {}\n", published.name));
            }
            None => {
                output.push_str(&format!(
                    "SDK Version:   {}\n",
                    plan.sdk_version.as_deref().unwrap_or("(unresolved)")
                ));
                output.push_str(&format!(
                    "Tooling:       {}\n",
                    plan.dialect.map(|d| d.name()).unwrap_or("(unknown)")
                ));
                output.push_str(&format!(
                    "Main Project:  {}\n",
                    plan.main_project
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "(none)".to_string())
                ));
            }
        }
        output.push('\n');

        output.push_str("Installers:\n");
        push_tree(&mut output, plan.installers.iter().map(|i| i.name().to_string()));
        output.push('\n');

        if !plan.commands.is_empty() {
            output.push_str("Commands:\n");
            push_tree(&mut output, plan.commands.iter().map(|c| c.display()));
            output.push('\n');
        }

        output.push_str(&format!(
            "Start:         {}\n",
            plan.start_command.as_deref().unwrap_or("(none)")
        ));
        output
    }
}

fn push_tree(output: &mut String, items: impl ExactSizeIterator<Item = String>) {
    let len = items.len();
    if len == 0 {
        output.push_str("\u{2514}\u{2500} (none)\n");
        return;
    }
    for (i, item) in items.enumerate() {
        let connector = if i + 1 == len { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item));
    }
}
