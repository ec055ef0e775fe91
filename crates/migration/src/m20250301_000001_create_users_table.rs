use sea_orm_migration::{prelude::*, schema::*};
use sea_query::{extension::postgres::Type, Alias};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create enum type first
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("user_role"))
                    .values(["admin", "assistant", "collaborator"])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).not_null().primary_key())
                    .col(string(Users::Nom).not_null())
                    .col(string(Users::Prenom).not_null())
                    .col(string(Users::Email).not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::Role)
                            .custom(Alias::new("user_role"))
                            .not_null(),
                    )
                    .col(string_null(Users::Specialite))
                    .col(string(Users::PasswordHash).not_null())
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
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
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("user_role")).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Nom,
    Prenom,
    Email,
    Role,
    Specialite,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
