//! # Guichet Error Infrastructure
//!
//! Error types and API response handling shared by every crate in the
//! workspace.

pub mod response;
pub mod traits;

pub use response::ErrorBody;
pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
///
/// Every variant maps onto exactly one HTTP status and a stable code string.
/// Scope-filtered lookups surface as `NotFound` rather than `Forbidden` so a
/// caller cannot probe for the existence of records outside their scope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    #[error("Validation: {message}")]
    Validation {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl ToString) -> Self {
        Self::NotFound {
            message: resource.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a conflict error.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized {
                ..
            } => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden {
                ..
            } => http::StatusCode::FORBIDDEN,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Validation {
                ..
            } => http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal {
                ..
            }
            | AppError::Database {
                ..
            }
            | AppError::Io {
                ..
            }
            | AppError::Config {
                ..
            }
            | AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::Unauthorized {
                ..
            } => "UNAUTHORIZED",
            AppError::Forbidden {
                ..
            } => "FORBIDDEN",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::Validation {
                ..
            } => "VALIDATION_ERROR",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound {
                message,
            }
            | AppError::BadRequest {
                message,
            }
            | AppError::Unauthorized {
                message,
            }
            | AppError::Forbidden {
                message,
            }
            | AppError::Conflict {
                message,
            }
            | AppError::Validation {
                message,
            }
            | AppError::Internal {
                message,
            }
            | AppError::Database {
                message,
            }
            | AppError::Io {
                message,
            }
            | AppError::Config {
                message,
            }
            | AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Add context to the error, preserving the variant.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let prefix = context.to_string();
        let wrap = |message: String| format!("{}: {}", prefix, message);
        match self {
            AppError::NotFound {
                message,
            } => {
                Self::NotFound {
                    message: wrap(message),
                }
            },
            AppError::BadRequest {
                message,
            } => {
                Self::BadRequest {
                    message: wrap(message),
                }
            },
            AppError::Unauthorized {
                message,
            } => {
                Self::Unauthorized {
                    message: wrap(message),
                }
            },
            AppError::Forbidden {
                message,
            } => {
                Self::Forbidden {
                    message: wrap(message),
                }
            },
            AppError::Conflict {
                message,
            } => {
                Self::Conflict {
                    message: wrap(message),
                }
            },
            AppError::Validation {
                message,
            } => {
                Self::Validation {
                    message: wrap(message),
                }
            },
            AppError::Internal {
                message,
            } => {
                Self::Internal {
                    message: wrap(message),
                }
            },
            AppError::Database {
                message,
            } => {
                Self::Database {
                    message: wrap(message),
                }
            },
            AppError::Io {
                message,
            } => {
                Self::Io {
                    message: wrap(message),
                }
            },
            AppError::Config {
                message,
            } => {
                Self::Config {
                    message: wrap(message),
                }
            },
            AppError::Migration {
                message,
            } => {
                Self::Migration {
                    message: wrap(message),
                }
            },
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert validator validation errors to AppError.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(_, errors)| {
                errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string())
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let message = if messages.is_empty() {
            "Validation failed".to_string()
        }
        else {
            messages.join(", ")
        };

        Self::Validation {
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("Ticket not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_error_unauthorized() {
        let err = AppError::unauthorized("Invalid email or password");
        assert_eq!(err.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_error_forbidden() {
        let err = AppError::forbidden("Access denied");
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_error_conflict() {
        let err = AppError::conflict("Client has demandeurs");
        assert_eq!(err.status(), http::StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn test_error_validation() {
        let err = AppError::validation("specialite is required");
        assert_eq!(err.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_server_side_errors_map_to_500() {
        assert_eq!(
            AppError::internal("x").status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::database("x").status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::config("x").status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::migration("x").status(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_context() {
        let err = AppError::not_found("Demandeur").context("Creating ticket");
        assert_eq!(err.message(), "Creating ticket: Demandeur");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AppError = io_err.into();
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "nom is required"))]
            nom: String,
        }

        let errors = Probe {
            nom: String::new(),
        }
        .validate()
        .unwrap_err();
        let err: AppError = errors.into();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.message().contains("nom is required"));
    }
}
