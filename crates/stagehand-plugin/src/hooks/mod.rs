//! Lifecycle hooks: stage definitions and the dispatcher.

pub mod definitions;
pub mod dispatcher;

pub use definitions::{LifecycleKey, LifecycleStage, Phase, UnknownStage};
pub use dispatcher::{DispatchSummary, LifecycleDispatcher};
