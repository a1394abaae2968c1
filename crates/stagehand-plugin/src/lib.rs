//! # stagehand-plugin
//!
//! Plugin framework for Stagehand. Provides:
//!
//! - The C ABI every dynamic plugin exports (descriptor + entry point)
//! - Discovery of candidate files below the plugin directory
//! - A loader that turns candidates into an immutable [`PluginSet`],
//!   skipping anything that fails to load
//! - A lifecycle dispatcher that calls plugins before and after each
//!   host stage, isolating plugins that fail

pub mod discovery;
pub mod error;
pub mod ffi;
pub mod hooks;
pub mod loader;
pub mod manager;
pub mod module;
pub mod prelude;
pub mod registry;

pub use error::PluginError;
pub use hooks::definitions::{LifecycleKey, LifecycleStage, Phase};
pub use hooks::dispatcher::{DispatchSummary, LifecycleDispatcher};
pub use loader::PluginLoader;
pub use manager::PluginManager;
pub use registry::{PluginDescriptor, PluginHandle, PluginSet};
