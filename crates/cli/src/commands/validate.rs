//! # CLI Validate Command

use error::{AppError, Result};

/// Validates the CLI configuration
///
/// # Errors
///
/// Returns a `Validation` error listing every missing environment variable.
pub fn validate() -> Result<()> {
    let required_vars = [
        "GUICHET_DATABASE_HOST",
        "GUICHET_DATABASE_PORT",
        "GUICHET_DATABASE_NAME",
        "GUICHET_DATABASE_USER",
        "GUICHET_DATABASE_PASSWORD",
        "GUICHET_JWT_SECRET",
    ];

    let mut missing = Vec::new();
    for var in &required_vars {
        if std::env::var(var).is_err() {
            missing.push(*var);
        }
    }

    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}
