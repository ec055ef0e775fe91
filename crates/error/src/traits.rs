//! # Error Traits
//!
//! Conversion helpers for error handling.

use crate::{AppError, Result};

/// Extension methods for Result types.
pub trait ResultExt<T> {
    /// Convert the error into an [`AppError`] with a context prefix.
    fn context<C: ToString>(self, context: C) -> Result<T>;
    /// Convert the error into an [`AppError`] and log it at error level.
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(error = %err, "Error occurred");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_variant() {
        let result: std::result::Result<(), AppError> = Err(AppError::not_found("Ticket"));
        let err = result.context("Assigning collaborateur").unwrap_err();

        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.message(), "Assigning collaborateur: Ticket");
    }

    #[test]
    fn test_log_error_passes_value_through() {
        let result: std::result::Result<u32, AppError> = Ok(7);
        assert_eq!(result.log_error().unwrap(), 7);
    }
}
