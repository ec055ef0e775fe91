//! # CLI Migration Command

use error::Result;
use migration::MigratorTrait as _;
use tracing::info;

use crate::{commands::MigrateArgs, config::DatabaseConfig};

/// Runs database migrations
///
/// # Errors
///
/// Returns an error when the database is unreachable or a migration fails.
pub async fn migrate(config: &DatabaseConfig, args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let database_url = crate::config::build_database_url(config);
    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| error::AppError::database(format!("Failed to connect to database: {}", e)))?;

    if args.dry_run {
        let pending = migration::Migrator::get_pending_migrations(&db)
            .await
            .map_err(|e| error::AppError::migration(format!("Failed to get pending migrations: {}", e)))?;

        info!(target: "migrate", pending_count = %pending.len(), "Pending migrations found");
        for m in &pending {
            info!(target: "migrate", migration = %m.name(), "Would apply");
        }

        return Ok(());
    }

    if args.rollback {
        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| error::AppError::migration(format!("Failed to rollback migration: {}", e)))?;

        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| error::AppError::migration(format!("Failed to run migrations: {}", e)))?;

    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}
