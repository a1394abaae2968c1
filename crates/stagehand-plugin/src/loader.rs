//! Dynamic plugin loader using `libloading`.
//!
//! Turns a list of candidate paths into a [`PluginSet`]. A candidate that
//! cannot be opened, lacks a descriptor, or carries a malformed one is
//! logged and skipped; the rest of the list is still loaded.

use std::collections::HashSet;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use stagehand_core::config::PluginConfig;

use crate::error::PluginError;
use crate::ffi::abi::{DESCRIPTOR_SYMBOL, FfiDescriptorFn, FfiPluginDescriptor};
use crate::ffi::safety::{checked_entry, decode_descriptor};
use crate::module::{EntryPoint, ModuleOpener, PluginModule};
use crate::registry::{PluginDescriptor, PluginHandle, PluginSet};

/// A shared library opened with `libloading`.
#[derive(Debug)]
pub struct DynamicModule {
    path: PathBuf,
    library: libloading::Library,
}

impl DynamicModule {
    /// Calls the exported descriptor function and returns its raw pointer.
    fn raw_descriptor(&self) -> Result<*const FfiPluginDescriptor, PluginError> {
        let describe: libloading::Symbol<'_, FfiDescriptorFn> =
            unsafe { self.library.get(DESCRIPTOR_SYMBOL.as_bytes()) }.map_err(|e| {
                PluginError::MetadataMissing {
                    symbol: DESCRIPTOR_SYMBOL.to_string(),
                    reason: error_chain(&e),
                }
            })?;

        Ok(unsafe { describe() })
    }
}

impl PluginModule for DynamicModule {
    fn descriptor(&self) -> Result<PluginDescriptor, PluginError> {
        let raw = self.raw_descriptor()?;
        unsafe { decode_descriptor(raw) }
    }

    fn entry_point(&self, name: &str) -> Result<EntryPoint<'_>, PluginError> {
        if name == DESCRIPTOR_SYMBOL {
            return Err(PluginError::EntryPointShape {
                name: name.to_string(),
                reason: "the descriptor function is not an entry point".to_string(),
            });
        }

        let symbol: libloading::Symbol<'_, *const c_void> =
            unsafe { self.library.get(name.as_bytes()) }.map_err(|e| {
                PluginError::EntryPointMissing {
                    name: name.to_string(),
                    reason: error_chain(&e),
                }
            })?;
        let address = *symbol;

        let raw = self.raw_descriptor().map_err(|e| PluginError::EntryPointShape {
            name: name.to_string(),
            reason: format!("descriptor of '{}' is gone: {e}", self.path.display()),
        })?;
        // Descriptors are statics in the module, valid while `library` is loaded.
        let declared = unsafe { raw.as_ref() }.and_then(|d| d.entry);

        let func = checked_entry(name, address, declared)?;
        Ok(EntryPoint::new(name, move || unsafe { func() }))
    }
}

/// Renders a `libloading` error with its source chain.
///
/// The outer message is only "dlopen failed" or similar; the loader's own
/// description of what went wrong sits in the source.
fn error_chain(err: &libloading::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Opens shared libraries (.so / .dll / .dylib) from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicOpener;

impl ModuleOpener for DynamicOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PluginModule>, PluginError> {
        // Loading runs the library's initialisers; only trusted plugin
        // directories should be configured.
        let library = unsafe { libloading::Library::new(path) }
            .map_err(|e| PluginError::Load(error_chain(&e)))?;

        Ok(Box::new(DynamicModule {
            path: path.to_path_buf(),
            library,
        }))
    }
}

/// Loads plugin candidates into an immutable [`PluginSet`].
#[derive(Debug)]
pub struct PluginLoader {
    /// Opens candidate files.
    opener: Box<dyn ModuleOpener>,
    /// Extensions (without the dot) that mark a loadable module.
    extensions: Vec<String>,
}

impl PluginLoader {
    /// Creates a loader backed by [`DynamicOpener`].
    pub fn new(extensions: Vec<String>) -> Self {
        Self::with_opener(Box::new(DynamicOpener), extensions)
    }

    /// Creates a loader with a custom module opener.
    pub fn with_opener(opener: Box<dyn ModuleOpener>, extensions: Vec<String>) -> Self {
        Self { opener, extensions }
    }

    /// Creates a dynamic loader using the configured extensions.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.extensions.clone())
    }

    /// Returns whether `path` carries one of the module extensions.
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Runs every load step on a single file.
    ///
    /// Does not apply the extension filter; callers that pass arbitrary
    /// paths should check [`Self::is_candidate`] first.
    pub fn load_one(&self, path: &Path) -> Result<PluginHandle, PluginError> {
        let module = self.opener.open(path)?;
        let descriptor = module.descriptor()?;
        Ok(PluginHandle::new(path.to_path_buf(), descriptor, module))
    }

    /// Loads every candidate in `paths`, preserving input order.
    ///
    /// Never fails: bad candidates are logged and left out of the result.
    /// A file listed more than once (by any path that resolves to it) is
    /// loaded the first time only, so no two handles share a module.
    pub fn load<I, P>(&self, paths: I) -> PluginSet
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut handles = Vec::new();
        let mut seen = HashSet::new();
        let mut candidates = 0usize;

        for path in paths {
            let path = path.as_ref();

            if !self.is_candidate(path) {
                trace!(path = %path.display(), "Not a plugin module, skipping");
                continue;
            }
            candidates += 1;

            let identity = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            if !seen.insert(identity) {
                debug!(path = %path.display(), "Plugin module already loaded, skipping");
                continue;
            }

            match self.load_one(path) {
                Ok(handle) => {
                    let descriptor = handle.descriptor();
                    info!(
                        path = %path.display(),
                        plugin = %descriptor.name,
                        stage = %descriptor.stage,
                        phase = %descriptor.phase,
                        entry_point = %descriptor.entry_point,
                        "Plugin loaded"
                    );
                    handles.push(handle);
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        step = e.step(),
                        error = %e,
                        "Skipping plugin candidate"
                    );
                }
            }
        }

        debug!(
            candidates = candidates,
            loaded = handles.len(),
            "Plugin loading complete"
        );

        PluginSet::from_handles(handles)
    }
}
