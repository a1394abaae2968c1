//! Stagehand host: a small program whose steps are observable by plugins.
//!
//! Loads every plugin under the configured directory once, then brackets
//! each of its own steps with the matching lifecycle dispatch.

use chrono::{Local, Timelike};
use tracing_subscriber::{EnvFilter, fmt};

use stagehand_core::config::AppConfig;
use stagehand_core::error::AppError;
use stagehand_plugin::{LifecycleStage, PluginManager};

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    run(&config);
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("STAGEHAND_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("STAGEHAND_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Loads plugins, then runs the host's own steps under their observation.
fn run(config: &AppConfig) {
    tracing::info!("Starting Stagehand v{}", env!("CARGO_PKG_VERSION"));

    let plugins = PluginManager::from_config(&config.plugins);
    println!("Process On ==========");

    let second = plugins.around(LifecycleStage::GetTime, current_second);
    plugins.around(LifecycleStage::DoPrint, || do_print(&plugins, second));

    println!("Process Stop ========");
}

fn current_second() -> u32 {
    Local::now().second()
}

fn do_print(plugins: &PluginManager, second: u32) {
    plugins.around(LifecycleStage::PrintItem, || {
        if second % 2 == 0 {
            println!("world");
        } else {
            println!("hello");
        }
    });
}
