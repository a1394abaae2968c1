//! Convenience result type alias for Stagehand.

use crate::error::AppError;

/// A specialized `Result` type for Stagehand operations.
pub type AppResult<T> = Result<T, AppError>;
