//! Convenience result type alias for NoteFlow.

use crate::error::AppError;

/// A specialized `Result` type for NoteFlow operations.
///
/// Every crate returns `AppResult<T>` at its public boundary so errors flow
/// through `?` without per-crate conversions.
pub type AppResult<T> = Result<T, AppError>;
