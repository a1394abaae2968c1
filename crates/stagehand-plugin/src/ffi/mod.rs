//! C ABI between the host and dynamic plugins.

pub mod abi;
pub mod safety;

pub use abi::{ABI_VERSION, DESCRIPTOR_SYMBOL, FfiEntryPointFn, FfiPluginDescriptor};
