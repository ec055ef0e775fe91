use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(uuid(Clients::Id).not_null().primary_key())
                    .col(string(Clients::Nom).not_null())
                    .col(string(Clients::Telephone).not_null())
                    .col(string(Clients::Email).not_null())
                    .col(string(Clients::Adresse).not_null())
                    .col(
                        timestamp_with_time_zone(Clients::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_nom")
                    .table(Clients::Table)
                    .col(Clients::Nom)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Clients {
    Table,
    Id,
    Nom,
    Telephone,
    Email,
    Adresse,
    CreatedAt,
}
