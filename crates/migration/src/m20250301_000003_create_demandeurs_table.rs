use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000002_create_clients_table::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Demandeurs::Table)
                    .if_not_exists()
                    .col(uuid(Demandeurs::Id).not_null().primary_key())
                    .col(string(Demandeurs::Nom).not_null())
                    .col(string(Demandeurs::Prenom).not_null())
                    .col(string(Demandeurs::Telephone).not_null())
                    .col(string(Demandeurs::Email).not_null())
                    .col(string(Demandeurs::Fonction).not_null())
                    .col(uuid(Demandeurs::ClientId).not_null())
                    .col(
                        timestamp_with_time_zone(Demandeurs::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_demandeurs_client")
                            .from(Demandeurs::Table, Demandeurs::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_demandeurs_client_id")
                    .table(Demandeurs::Table)
                    .col(Demandeurs::ClientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Demandeurs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Demandeurs {
    Table,
    Id,
    Nom,
    Prenom,
    Telephone,
    Email,
    Fonction,
    ClientId,
    CreatedAt,
}
