//! # Guichet CLI
//!
//! Command-line interface for the Guichet ticketing service.
//!
//! ## Usage
//!
//! ```bash
//! guichet serve    # Start the API server (runs migrations automatically)
//! guichet migrate  # Run database migrations
//! guichet --help   # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use commands::Commands;
use config::DatabaseConfig;
use error::Result;

/// Guichet - small business ticketing service
#[derive(Parser, Debug)]
#[command(name = "guichet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "GUICHET_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Serve(args) => {
            let db_config = DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
            server::serve(&db_config, &args).await?;
        },
        Commands::Migrate(args) => {
            let db_config = DatabaseConfig::from_env().map_err(|e| error::AppError::config(e.to_string()))?;
            commands::migrate::migrate(&db_config, args).await?;
        },
        Commands::Completions(args) => {
            commands::completions::completions(args.shell, &mut Cli::command())?;
        },
        Commands::Validate => {
            commands::validate::validate()?;
            logging::info!(target: "validate", "Configuration is valid");
        },
    }

    Ok(())
}
