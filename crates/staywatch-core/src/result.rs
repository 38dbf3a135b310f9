//! Convenience result type alias for StayWatch.

use crate::error::AppError;

/// A specialized `Result` type for StayWatch operations.
pub type AppResult<T> = Result<T, AppError>;
