//! # CLI Commands
//!
//! Implementation of CLI commands for the Guichet application.

pub mod completions;
pub mod migrate;
pub mod validate;

use clap::{Args, Subcommand};

/// Available commands for the Guichet CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "GUICHET_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "GUICHET_PORT", default_value = "3000")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Run migrations in dry-run mode (no changes)
    #[arg(long)]
    pub dry_run: bool,

    /// Rollback the last migration
    #[arg(long)]
    pub rollback: bool,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
