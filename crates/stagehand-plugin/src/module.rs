//! Capabilities a loaded module must provide to the host.
//!
//! The loader and dispatcher only ever talk to modules through these
//! traits. Every symbol lookup is fallible and yields either a typed value
//! or a [`PluginError`]; the raw casts live in [`crate::loader`] and
//! [`crate::ffi`].

use std::fmt;
use std::path::Path;

use crate::error::PluginError;
use crate::registry::PluginDescriptor;

/// A loaded module able to describe itself and hand out entry points.
pub trait PluginModule: Send + Sync + fmt::Debug {
    /// Resolves and decodes the module's descriptor.
    ///
    /// Returns [`PluginError::MetadataMissing`] if the descriptor symbol is
    /// absent and [`PluginError::MetadataShape`] if its value is invalid.
    fn descriptor(&self) -> Result<PluginDescriptor, PluginError>;

    /// Resolves the zero-argument entry point called `name`.
    ///
    /// Returns [`PluginError::EntryPointMissing`] or
    /// [`PluginError::EntryPointShape`] on failure.
    fn entry_point(&self, name: &str) -> Result<EntryPoint<'_>, PluginError>;
}

/// Opens files as [`PluginModule`]s.
pub trait ModuleOpener: Send + Sync + fmt::Debug {
    /// Opens the module at `path`, or returns [`PluginError::Load`].
    fn open(&self, path: &Path) -> Result<Box<dyn PluginModule>, PluginError>;
}

/// A resolved entry point, borrowed from the module that exports it.
pub struct EntryPoint<'m> {
    name: String,
    call: Box<dyn Fn() + 'm>,
}

impl<'m> EntryPoint<'m> {
    /// Wraps a callable resolved from a module.
    pub fn new(name: impl Into<String>, call: impl Fn() + 'm) -> Self {
        Self {
            name: name.into(),
            call: Box::new(call),
        }
    }

    /// Name the entry point was resolved under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the entry point synchronously.
    pub fn invoke(&self) {
        (self.call)()
    }
}

impl fmt::Debug for EntryPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .field("call", &"<fn>")
            .finish()
    }
}
