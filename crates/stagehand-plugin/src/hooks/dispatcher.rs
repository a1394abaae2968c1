//! Lifecycle dispatcher: calls the plugins registered for a stage and phase.
//!
//! - Matching plugins are called in load order, one at a time, each to
//!   completion before the next starts.
//! - A plugin whose entry point cannot be resolved, or that panics, is
//!   logged and skipped; the remaining plugins still run.
//! - Plugins observe host work. Nothing they do can stop or replace it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::PluginError;
use crate::registry::{PluginHandle, PluginSet};

use super::definitions::{LifecycleStage, Phase};

/// Counts from a single dispatch, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Plugins whose descriptor matched the stage and phase.
    pub matched: usize,
    /// Plugins whose entry point ran to completion.
    pub invoked: usize,
    /// Plugins skipped because of a resolution failure or a panic.
    pub failed: usize,
}

/// Dispatches lifecycle checkpoints to the loaded plugins.
#[derive(Debug, Clone)]
pub struct LifecycleDispatcher {
    /// Loaded plugins.
    plugins: Arc<PluginSet>,
}

impl LifecycleDispatcher {
    /// Creates a dispatcher over a loaded plugin set.
    pub fn new(plugins: Arc<PluginSet>) -> Self {
        Self { plugins }
    }

    /// Calls every plugin registered for `stage` at `phase`.
    pub fn dispatch(&self, stage: LifecycleStage, phase: Phase) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for handle in self.plugins.matching(stage, phase) {
            summary.matched += 1;

            match invoke(handle) {
                Ok(()) => summary.invoked += 1,
                Err(e) => {
                    summary.failed += 1;
                    match &e {
                        PluginError::Panicked { .. } => error!(
                            stage = %stage,
                            phase = %phase,
                            path = %handle.source_path().display(),
                            plugin = %handle.descriptor().name,
                            error = %e,
                            "Plugin panicked"
                        ),
                        _ => warn!(
                            stage = %stage,
                            phase = %phase,
                            path = %handle.source_path().display(),
                            entry_point = %handle.descriptor().entry_point,
                            error = %e,
                            "Skipping plugin with unusable entry point"
                        ),
                    }
                }
            }
        }

        if summary.matched > 0 {
            debug!(
                stage = %stage,
                phase = %phase,
                matched = summary.matched,
                invoked = summary.invoked,
                failed = summary.failed,
                "Lifecycle dispatched"
            );
        }

        summary
    }

    /// Fires the `before` phase of `stage`.
    pub fn before(&self, stage: LifecycleStage) -> DispatchSummary {
        self.dispatch(stage, Phase::Before)
    }

    /// Fires the `after` phase of `stage`.
    pub fn after(&self, stage: LifecycleStage) -> DispatchSummary {
        self.dispatch(stage, Phase::After)
    }

    /// Runs `work` bracketed by the `before` and `after` phases of `stage`.
    pub fn around<T>(&self, stage: LifecycleStage, work: impl FnOnce() -> T) -> T {
        self.before(stage);
        let output = work();
        self.after(stage);
        output
    }

    /// Returns the plugin set this dispatcher reads.
    pub fn plugins(&self) -> &Arc<PluginSet> {
        &self.plugins
    }
}

/// Resolves and calls a handle's entry point, containing any panic.
fn invoke(handle: &PluginHandle) -> Result<(), PluginError> {
    let name = &handle.descriptor().entry_point;
    let entry = handle.module().entry_point(name)?;

    panic::catch_unwind(AssertUnwindSafe(|| entry.invoke())).map_err(|payload| {
        PluginError::Panicked {
            name: name.clone(),
            message: panic_message(payload.as_ref()),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
