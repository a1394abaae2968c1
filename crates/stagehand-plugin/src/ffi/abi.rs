//! FFI ABI definitions for dynamic plugins.
//!
//! Defines the C-compatible interface that dynamic plugins must export.

use std::os::raw::c_char;

/// Version of the descriptor layout below. Bumped on any layout change.
pub const ABI_VERSION: u32 = 2;

/// Name of the exported function returning the plugin descriptor.
pub const DESCRIPTOR_SYMBOL: &str = "stagehand_plugin_descriptor";

/// FFI-safe plugin descriptor.
///
/// All string fields are nul-terminated and must stay valid for as long as
/// the module is loaded (in practice: string literals in the plugin).
#[repr(C)]
#[derive(Debug)]
pub struct FfiPluginDescriptor {
    /// Must equal [`ABI_VERSION`].
    pub abi_version: u32,
    /// Human-readable plugin name.
    pub name: *const c_char,
    /// Lifecycle stage tag, e.g. `"do_print"`.
    pub stage: *const c_char,
    /// Non-zero to run before the stage's work, zero to run after.
    pub phase: u8,
    /// Name of the exported [`FfiEntryPointFn`].
    pub entry_point: *const c_char,
    /// The function exported under `entry_point`.
    ///
    /// The host only calls the symbol it resolves by name if its address is
    /// this function.
    pub entry: Option<FfiEntryPointFn>,
}

// Descriptors are immutable statics pointing at immutable string literals.
unsafe impl Sync for FfiPluginDescriptor {}

/// Type signature of the descriptor function.
///
/// Dynamic plugins must export this function:
/// ```c
/// const FfiPluginDescriptor* stagehand_plugin_descriptor(void);
/// ```
pub type FfiDescriptorFn = unsafe extern "C" fn() -> *const FfiPluginDescriptor;

/// Type signature of a plugin entry point: no arguments, no return value.
pub type FfiEntryPointFn = unsafe extern "C" fn();
