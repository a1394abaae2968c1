//! FFI safety wrappers: converts between FFI types and Rust types.

use std::ffi::{CStr, c_void};
use std::os::raw::c_char;

use crate::error::PluginError;
use crate::hooks::definitions::{LifecycleStage, Phase};
use crate::registry::PluginDescriptor;

use super::abi::{ABI_VERSION, FfiEntryPointFn, FfiPluginDescriptor};

/// Converts a C string pointer to an owned Rust `String`.
///
/// Returns `None` if the pointer is null or the bytes are not UTF-8.
///
/// # Safety
/// `ptr` must be null or point at a nul-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn c_str_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .ok()
        .map(str::to_string)
}

/// Copies an FFI descriptor into a validated [`PluginDescriptor`].
///
/// # Safety
/// `ptr` must be null or point at an `FfiPluginDescriptor` whose string
/// fields satisfy the contract of [`c_str_to_string`].
pub unsafe fn decode_descriptor(
    ptr: *const FfiPluginDescriptor,
) -> Result<PluginDescriptor, PluginError> {
    let Some(raw) = (unsafe { ptr.as_ref() }) else {
        return Err(PluginError::MetadataShape(
            "descriptor function returned null".to_string(),
        ));
    };

    if raw.abi_version != ABI_VERSION {
        return Err(PluginError::MetadataShape(format!(
            "ABI version {} is not supported (host expects {})",
            raw.abi_version, ABI_VERSION
        )));
    }

    let name = unsafe { required_field(raw.name, "name") }?;
    let stage_tag = unsafe { required_field(raw.stage, "stage") }?;
    let entry_point = unsafe { required_field(raw.entry_point, "entry_point") }?;

    let stage = stage_tag
        .parse::<LifecycleStage>()
        .map_err(|e| PluginError::MetadataShape(e.to_string()))?;

    if entry_point.is_empty() {
        return Err(PluginError::MetadataShape(
            "entry_point is empty".to_string(),
        ));
    }

    if raw.entry.is_none() {
        return Err(PluginError::MetadataShape(
            "field 'entry' is null".to_string(),
        ));
    }

    Ok(PluginDescriptor {
        name,
        stage,
        phase: Phase::from_flag(raw.phase),
        entry_point,
    })
}

/// Checks that the symbol resolved for `name` is the function the descriptor
/// declares, and returns that function.
///
/// A data symbol, or any function other than the declared one, is rejected
/// with [`PluginError::EntryPointShape`]; nothing is cast from the address.
pub fn checked_entry(
    name: &str,
    address: *const c_void,
    declared: Option<FfiEntryPointFn>,
) -> Result<FfiEntryPointFn, PluginError> {
    let shape_error = |reason: &str| PluginError::EntryPointShape {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if address.is_null() {
        return Err(shape_error("symbol resolves to null"));
    }
    let Some(entry) = declared else {
        return Err(shape_error("descriptor declares no entry function"));
    };
    if entry as *const c_void != address {
        return Err(shape_error(
            "symbol is not the entry function declared by the descriptor",
        ));
    }
    Ok(entry)
}

unsafe fn required_field(ptr: *const c_char, field: &str) -> Result<String, PluginError> {
    unsafe { c_str_to_string(ptr) }.ok_or_else(|| {
        PluginError::MetadataShape(format!("field '{field}' is null or not valid UTF-8"))
    })
}
