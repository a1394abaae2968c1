//! CLI command definitions and dispatch.

pub mod config;
pub mod plugins;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use stagehand_core::config::AppConfig;
use stagehand_core::error::AppError;

/// Inspect Stagehand plugins and configuration
#[derive(Debug, Parser)]
#[command(name = "stagehand-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay to apply (`config/<env>.toml`)
    #[arg(short, long, env = "STAGEHAND_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Plugin inspection
    Plugins(plugins::PluginsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Plugins(args) => plugins::execute(args, &self.load_config()?, self.format),
            Commands::Config(args) => config::execute(args, self, self.format),
        }
    }

    /// Helper: load configuration from file
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        debug!(path = %self.config, env = %self.env, "Loading configuration");
        AppConfig::load(&self.config, &self.env)
    }
}
