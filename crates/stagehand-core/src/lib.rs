//! # stagehand-core
//!
//! Core crate for Stagehand. Contains the configuration schemas and the
//! unified error system shared by the host, the plugin framework and the
//! admin CLI.
//!
//! This crate has **no** internal dependencies on other Stagehand crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
