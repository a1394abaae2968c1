//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use stagehand_core::error::AppError;

use super::Cli;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration files
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = cli.load_config()?;
            output::print_item(&config, format)?;
        }
        ConfigCommand::Validate => match cli.load_config() {
            Ok(config) => {
                output::print_success(&format!(
                    "Configuration '{}' (env: {}) is valid",
                    cli.config, cli.env
                ));
                output::print_kv("Plugin directory", &config.plugins.directory);
                output::print_kv("Auto-load", &config.plugins.auto_load.to_string());
                output::print_kv("Extensions", &config.plugins.extensions.join(", "));
                output::print_kv("Log level", &config.logging.level);
                output::print_kv("Log format", &config.logging.format);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
