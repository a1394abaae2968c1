//! # stagehand-plugin-sdk
//!
//! SDK for developing Stagehand plugins.
//!
//! A plugin is a `cdylib` that exports a descriptor and one entry point.
//! [`export_plugin!`] generates both:
//!
//! ```rust,ignore
//! use stagehand_plugin_sdk::prelude::*;
//!
//! fn greet() {
//!     println!("about to print");
//! }
//!
//! export_plugin! {
//!     name: "greeter",
//!     stage: LifecycleStage::DoPrint,
//!     phase: Phase::Before,
//!     entry_point: greeter_run => greet,
//! }
//! ```
//!
//! ```toml
//! [lib]
//! crate-type = ["cdylib"]
//! ```

pub use stagehand_plugin::ffi::abi::{ABI_VERSION, DESCRIPTOR_SYMBOL, FfiPluginDescriptor};
pub use stagehand_plugin::hooks::definitions::{LifecycleStage, Phase};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::export_plugin;
    pub use stagehand_plugin::hooks::definitions::{LifecycleStage, Phase};
}

/// Runs a plugin handler, stopping a panic at the FFI boundary.
///
/// The host's logger does not reach into the plugin, so the panic is
/// reported on stderr.
#[doc(hidden)]
pub fn guard(entry_point: &str, handler: fn()) {
    if let Err(payload) = std::panic::catch_unwind(handler) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        eprintln!("plugin entry point '{entry_point}' panicked: {message}");
    }
}

/// Exports a plugin descriptor and its entry point.
///
/// `entry_point: symbol => handler` exports an `extern "C" fn symbol()`
/// that calls the Rust `fn()` `handler`. The descriptor names `symbol`, so
/// the host resolves exactly the function generated here.
#[macro_export]
macro_rules! export_plugin {
    (
        name: $name:literal,
        stage: $stage:expr,
        phase: $phase:expr,
        entry_point: $entry:ident => $handler:expr $(,)?
    ) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn $entry() {
            $crate::guard(stringify!($entry), $handler);
        }

        #[doc(hidden)]
        static __STAGEHAND_DESCRIPTOR: $crate::FfiPluginDescriptor = $crate::FfiPluginDescriptor {
            abi_version: $crate::ABI_VERSION,
            name: concat!($name, "\0").as_ptr().cast(),
            stage: $crate::LifecycleStage::as_c_str(&$stage).as_ptr(),
            phase: $crate::Phase::as_flag(&$phase),
            entry_point: concat!(stringify!($entry), "\0").as_ptr().cast(),
            entry: Some($entry),
        };

        // Must match `DESCRIPTOR_SYMBOL`.
        #[unsafe(no_mangle)]
        pub extern "C" fn stagehand_plugin_descriptor() -> *const $crate::FfiPluginDescriptor {
            &__STAGEHAND_DESCRIPTOR
        }
    };
}
