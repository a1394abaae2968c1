//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;

use crate::error::AppError;

/// Prefix of environment variables that override file settings,
/// e.g. `STAGEHAND__PLUGINS__DIRECTORY=/opt/plugins`.
pub const ENV_PREFIX: &str = "STAGEHAND";

/// Root application configuration.
///
/// Every section has defaults, so an absent or empty configuration file
/// yields a usable host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin system settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Layers, later ones winning: the file at `path`, an environment overlay
    /// `{env}.toml` in the same directory, then `STAGEHAND__*` environment
    /// variables. Both files are optional.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let base = Path::new(path);
        let overlay = base.with_file_name(format!("{env}.toml"));

        let config = config::Config::builder()
            .add_source(config::File::from(base).required(false))
            .add_source(config::File::from(overlay.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("plugins.extensions")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
