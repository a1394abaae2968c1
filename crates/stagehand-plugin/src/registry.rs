//! Plugin set: the loaded plugin handles and their descriptors.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::hooks::definitions::{LifecycleKey, LifecycleStage, Phase};
use crate::module::PluginModule;

/// Metadata a plugin declares about itself, copied out of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Human-readable plugin name.
    pub name: String,
    /// Stage the plugin observes.
    pub stage: LifecycleStage,
    /// Before or after the stage's work.
    pub phase: Phase,
    /// Exported zero-argument function the host calls. Never empty.
    pub entry_point: String,
}

impl PluginDescriptor {
    /// Returns the lifecycle key this plugin matches.
    pub fn key(&self) -> LifecycleKey {
        LifecycleKey::new(self.stage, self.phase)
    }

    /// Returns whether this plugin wants to run at `stage`/`phase`.
    pub fn matches(&self, stage: LifecycleStage, phase: Phase) -> bool {
        self.stage == stage && self.phase == phase
    }
}

/// A successfully loaded plugin.
///
/// The module is exclusively owned by its handle and stays loaded for as
/// long as the handle lives.
#[derive(Debug)]
pub struct PluginHandle {
    source_path: PathBuf,
    descriptor: PluginDescriptor,
    module: Box<dyn PluginModule>,
}

impl PluginHandle {
    /// Creates a handle. Used by the loader.
    pub(crate) fn new(
        source_path: PathBuf,
        descriptor: PluginDescriptor,
        module: Box<dyn PluginModule>,
    ) -> Self {
        Self {
            source_path,
            descriptor,
            module,
        }
    }

    /// File the module was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Descriptor read at load time.
    pub fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    /// The loaded module, for symbol resolution.
    pub fn module(&self) -> &dyn PluginModule {
        self.module.as_ref()
    }
}

/// Ordered, immutable collection of loaded plugins.
///
/// Built once by [`crate::loader::PluginLoader`]; there is no way to add or
/// remove handles afterwards.
#[derive(Debug, Default)]
pub struct PluginSet {
    handles: Vec<PluginHandle>,
}

impl PluginSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_handles(handles: Vec<PluginHandle>) -> Self {
        Self { handles }
    }

    /// Number of loaded plugins.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no plugin was loaded.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates over the handles in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, PluginHandle> {
        self.handles.iter()
    }

    /// Iterates over the handles matching `stage`/`phase`, in load order.
    pub fn matching(
        &self,
        stage: LifecycleStage,
        phase: Phase,
    ) -> impl Iterator<Item = &PluginHandle> + '_ {
        self.handles
            .iter()
            .filter(move |handle| handle.descriptor.matches(stage, phase))
    }

    /// Descriptors of every loaded plugin, in load order.
    pub fn descriptors(&self) -> Vec<PluginDescriptor> {
        self.handles.iter().map(|h| h.descriptor.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a PluginSet {
    type Item = &'a PluginHandle;
    type IntoIter = std::slice::Iter<'a, PluginHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter()
    }
}
