//! # CLI Server
//!
//! Server startup and management for the Guichet CLI.

use ::server::{create_app_router, AppState};
use auth::JwtConfig;
use error::{AppError, Result, ResultExt};
use migration::{Migrator, MigratorTrait as _};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    commands::ServeArgs,
    config::{build_database_url, parse_socket_addr, DatabaseConfig},
};

/// Starts the API server
///
/// Connects to the database, applies pending migrations, then serves HTTP
/// until a shutdown signal arrives.
pub async fn serve(config: &DatabaseConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", host = %args.host, port = %args.port, "Starting API server...");

    let jwt_config = JwtConfig::default();
    if jwt_config.secret.is_empty() {
        return Err(AppError::config("GUICHET_JWT_SECRET must be set"));
    }

    let database_url = build_database_url(config);

    info!(target: "serve", db_host = %config.host, db_name = %config.database, "Connecting to database...");
    let db = migration::connect_to_database(&database_url)
        .await
        .context("Failed to connect to database")?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    info!(target: "serve", "Database migrations completed successfully");

    let state = AppState {
        db,
        jwt_config,
    };

    let app = create_app_router(state);

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| AppError::config(format!("Invalid address {}:{}: {}", args.host, args.port, e)))?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", address, e)))?;

    info!(target: "serve", %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {}", e)))?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!(target: "serve", "Shutdown signal received");
}
