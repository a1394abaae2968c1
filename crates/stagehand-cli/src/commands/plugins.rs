//! Plugin inspection CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use stagehand_core::config::AppConfig;
use stagehand_core::error::AppError;
use stagehand_plugin::{LifecycleStage, PluginDescriptor, PluginLoader, discovery};

/// Arguments for plugin commands
#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Plugin subcommand
    #[command(subcommand)]
    pub command: PluginsCommand,
}

/// Plugin subcommands
#[derive(Debug, Subcommand)]
pub enum PluginsCommand {
    /// Discover and load plugins, then list the ones that loaded
    List {
        /// Plugin directory (defaults to `plugins.directory`)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Run the load steps on a single module and report the result
    Check {
        /// Path to the module
        path: PathBuf,
    },
    /// List the lifecycle stages plugins may declare
    Stages,
}

/// A loaded plugin, as displayed
#[derive(Debug, Serialize, Tabled)]
pub struct PluginRow {
    /// Plugin name
    pub name: String,
    /// Stage tag
    pub stage: String,
    /// `before` or `after`
    pub phase: String,
    /// Entry point symbol
    pub entry_point: String,
    /// Source file
    pub path: String,
}

impl PluginRow {
    fn new(descriptor: &PluginDescriptor, path: &Path) -> Self {
        Self {
            name: descriptor.name.clone(),
            stage: descriptor.stage.to_string(),
            phase: descriptor.phase.to_string(),
            entry_point: descriptor.entry_point.clone(),
            path: path.display().to_string(),
        }
    }
}

/// A lifecycle stage, as displayed
#[derive(Debug, Serialize, Tabled)]
pub struct StageRow {
    /// Stage tag
    pub stage: &'static str,
}

/// Execute plugin commands
pub fn execute(
    args: &PluginsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        PluginsCommand::List { dir } => {
            let dir = dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.plugins.directory));
            let loader = PluginLoader::from_config(&config.plugins);
            let plugins = loader.load(discovery::find_files(&dir));

            let rows: Vec<PluginRow> = plugins
                .iter()
                .map(|handle| PluginRow::new(handle.descriptor(), handle.source_path()))
                .collect();
            output::print_list(&rows, format, "No plugins loaded.")?;
        }
        PluginsCommand::Check { path } => {
            let loader = PluginLoader::from_config(&config.plugins);
            if !loader.is_candidate(path) {
                output::print_warning(&format!(
                    "'{}' does not have a module extension ({}); the host would skip it",
                    path.display(),
                    config.plugins.extensions.join(", ")
                ));
            }

            match loader.load_one(path) {
                Ok(handle) => {
                    output::print_success(&format!("'{}' is a valid plugin", path.display()));
                    output::print_item(handle.descriptor(), format)?;
                }
                Err(e) => {
                    output::print_error(&format!(
                        "'{}' failed at step '{}': {}",
                        path.display(),
                        e.step(),
                        e
                    ));
                    return Err(e.into());
                }
            }
        }
        PluginsCommand::Stages => {
            let rows: Vec<StageRow> = LifecycleStage::ALL
                .iter()
                .map(|stage| StageRow {
                    stage: stage.as_str(),
                })
                .collect();
            output::print_list(&rows, format, "No stages defined.")?;
        }
    }

    Ok(())
}
