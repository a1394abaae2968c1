//! Plugin manager: owns the loaded plugin set for the host's lifetime.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use stagehand_core::config::PluginConfig;

use crate::discovery;
use crate::hooks::definitions::LifecycleStage;
use crate::hooks::dispatcher::LifecycleDispatcher;
use crate::loader::PluginLoader;
use crate::registry::PluginSet;

/// Loads plugins once at startup and hands out the dispatcher.
///
/// The plugin set is built in the constructor and never changes; dropping
/// the manager unloads every module at once.
#[derive(Debug, Clone)]
pub struct PluginManager {
    /// Dispatcher over the loaded set.
    dispatcher: LifecycleDispatcher,
}

impl PluginManager {
    /// Wraps an already loaded plugin set.
    pub fn new(plugins: PluginSet) -> Self {
        Self {
            dispatcher: LifecycleDispatcher::new(Arc::new(plugins)),
        }
    }

    /// Creates a manager with no plugins.
    pub fn empty() -> Self {
        Self::new(PluginSet::empty())
    }

    /// Discovers and loads plugins according to `config`.
    ///
    /// With `auto_load` disabled the manager starts empty.
    pub fn from_config(config: &PluginConfig) -> Self {
        if !config.auto_load {
            info!("Plugin auto-load disabled");
            return Self::empty();
        }

        let loader = PluginLoader::from_config(config);
        Self::load_directory(&loader, Path::new(&config.directory))
    }

    /// Discovers every file below `directory` and loads the modules among them.
    pub fn load_directory(loader: &PluginLoader, directory: &Path) -> Self {
        let files = discovery::find_files(directory);
        let plugins = loader.load(&files);

        info!(
            directory = %directory.display(),
            files = files.len(),
            plugins = plugins.len(),
            "Plugins loaded"
        );

        Self::new(plugins)
    }

    /// Returns the lifecycle dispatcher.
    pub fn dispatcher(&self) -> &LifecycleDispatcher {
        &self.dispatcher
    }

    /// Returns the loaded plugins.
    pub fn plugins(&self) -> &Arc<PluginSet> {
        self.dispatcher.plugins()
    }

    /// Runs `work` bracketed by the plugins registered for `stage`.
    pub fn around<T>(&self, stage: LifecycleStage, work: impl FnOnce() -> T) -> T {
        self.dispatcher.around(stage, work)
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::empty()
    }
}
