//! Prelude for convenient imports.

pub use crate::error::PluginError;
pub use crate::hooks::definitions::{LifecycleKey, LifecycleStage, Phase};
pub use crate::hooks::dispatcher::{DispatchSummary, LifecycleDispatcher};
pub use crate::loader::{DynamicOpener, PluginLoader};
pub use crate::manager::PluginManager;
pub use crate::module::{EntryPoint, ModuleOpener, PluginModule};
pub use crate::registry::{PluginDescriptor, PluginHandle, PluginSet};
