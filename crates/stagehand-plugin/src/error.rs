//! Plugin failure taxonomy.
//!
//! Every variant is terminal only for the candidate or handle that produced
//! it. The loader and dispatcher log these and move on; they never abort.

use thiserror::Error;

use stagehand_core::error::AppError;

/// Errors raised while loading a plugin or invoking its entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// The file could not be opened as a dynamic module.
    #[error("failed to open module: {0}")]
    Load(String),
    /// The module does not export the descriptor symbol.
    #[error("descriptor symbol '{symbol}' not found: {reason}")]
    MetadataMissing {
        /// Symbol that was looked up.
        symbol: String,
        /// Underlying loader message.
        reason: String,
    },
    /// The descriptor symbol exists but its value is not a valid descriptor.
    #[error("malformed plugin descriptor: {0}")]
    MetadataShape(String),
    /// The declared entry point is not exported by the module.
    #[error("entry point '{name}' not found: {reason}")]
    EntryPointMissing {
        /// Entry point name from the descriptor.
        name: String,
        /// Underlying loader message.
        reason: String,
    },
    /// The declared entry point resolved to something that is not callable.
    #[error("entry point '{name}' is not a callable: {reason}")]
    EntryPointShape {
        /// Entry point name from the descriptor.
        name: String,
        /// Why the symbol was rejected.
        reason: String,
    },
    /// The entry point panicked while the host was calling it.
    #[error("entry point '{name}' panicked: {message}")]
    Panicked {
        /// Entry point name from the descriptor.
        name: String,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl PluginError {
    /// Returns a short stable label for the failing step, used in log fields.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Load(_) => "open",
            Self::MetadataMissing { .. } => "descriptor_lookup",
            Self::MetadataShape(_) => "descriptor_decode",
            Self::EntryPointMissing { .. } => "entry_point_lookup",
            Self::EntryPointShape { .. } => "entry_point_decode",
            Self::Panicked { .. } => "invoke",
        }
    }
}

impl From<PluginError> for AppError {
    fn from(err: PluginError) -> Self {
        AppError::plugin(err.to_string())
    }
}
