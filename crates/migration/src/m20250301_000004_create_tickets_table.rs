use sea_orm_migration::{prelude::*, schema::*};
use sea_query::{extension::postgres::Type, Alias};

use crate::{
    m20250301_000001_create_users_table::Users,
    m20250301_000002_create_clients_table::Clients,
    m20250301_000003_create_demandeurs_table::Demandeurs,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("ticket_etat"))
                    .values(["ouvert", "en_cours", "ferme"])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("ticket_type"))
                    .values(["bug", "feature", "support", "autre"])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(uuid(Tickets::Id).not_null().primary_key())
                    .col(uuid(Tickets::ClientId).not_null())
                    .col(uuid(Tickets::DemandeurId).not_null())
                    .col(uuid_null(Tickets::CollaborateurId))
                    .col(
                        ColumnDef::new(Tickets::Etat)
                            .custom(Alias::new("ticket_etat"))
                            .not_null()
                            .default(Expr::cust("'ouvert'")),
                    )
                    .col(
                        ColumnDef::new(Tickets::Type)
                            .custom(Alias::new("ticket_type"))
                            .not_null()
                            .default(Expr::cust("'bug'")),
                    )
                    .col(text(Tickets::Observation).not_null())
                    .col(string_null(Tickets::ModeIntervention))
                    .col(integer(Tickets::Duree).not_null().default(0))
                    .col(timestamp_with_time_zone_null(Tickets::DateResolution))
                    .col(
                        timestamp_with_time_zone(Tickets::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tickets::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_client")
                            .from(Tickets::Table, Tickets::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_demandeur")
                            .from(Tickets::Table, Tickets::DemandeurId)
                            .to(Demandeurs::Table, Demandeurs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_collaborateur")
                            .from(Tickets::Table, Tickets::CollaborateurId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_etat")
                    .table(Tickets::Table)
                    .col(Tickets::Etat)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tickets_collaborateur_id")
                    .table(Tickets::Table)
                    .col(Tickets::CollaborateurId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("ticket_type")).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("ticket_etat")).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Tickets {
    Table,
    Id,
    ClientId,
    DemandeurId,
    CollaborateurId,
    Etat,
    Type,
    Observation,
    ModeIntervention,
    Duree,
    DateResolution,
    CreatedAt,
    UpdatedAt,
}
