//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Directory searched recursively for plugin shared libraries.
    #[serde(default = "default_plugin_directory")]
    pub directory: String,
    /// Whether to discover and load plugins on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
    /// File extensions (without the leading dot) treated as loadable modules.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            auto_load: default_true(),
            extensions: default_extensions(),
        }
    }
}

fn default_plugin_directory() -> String {
    "./plugins".to_string()
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec![std::env::consts::DLL_EXTENSION.to_string()]
}
