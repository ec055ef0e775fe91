//! # Guichet Logging Infrastructure
//!
//! Structured logging for the Guichet service: tracing integration with
//! JSON or human-readable output, configured from the environment.

pub mod config;

pub use config::LoggingConfig;
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Log level (debug, info, warn, error)
/// * `format` - Output format (json, pretty, compact)
pub fn init(level: &str, format: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let config = LoggingConfig::from_env(level, format);
    init_with_config(config)
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}
