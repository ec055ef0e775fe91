//! # Database Migrations
//!
//! Sea-ORM migrations for the Guichet schema. Migrations are executed in the
//! order they appear in [`Migrator::migrations`].

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_clients_table;
mod m20250301_000003_create_demandeurs_table;
mod m20250301_000004_create_tickets_table;
mod m20250301_000005_create_ticket_comments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_clients_table::Migration),
            Box::new(m20250301_000003_create_demandeurs_table::Migration),
            Box::new(m20250301_000004_create_tickets_table::Migration),
            Box::new(m20250301_000005_create_ticket_comments_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_registered_in_order() {
        let migrations = Migrator::migrations();
        assert_eq!(migrations.len(), 5);
    }
}
