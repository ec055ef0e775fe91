use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250301_000001_create_users_table::Users, m20250301_000004_create_tickets_table::Tickets};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketComments::Table)
                    .if_not_exists()
                    // Auto-increment id doubles as the append order
                    .col(pk_auto(TicketComments::Id))
                    .col(uuid(TicketComments::TicketId).not_null())
                    .col(uuid(TicketComments::UserId).not_null())
                    .col(text(TicketComments::Text).not_null())
                    .col(
                        timestamp_with_time_zone(TicketComments::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_comments_ticket")
                            .from(TicketComments::Table, TicketComments::TicketId)
                            .to(Tickets::Table, Tickets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_comments_user")
                            .from(TicketComments::Table, TicketComments::UserId)
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
                    .name("idx_ticket_comments_ticket_id")
                    .table(TicketComments::Table)
                    .col(TicketComments::TicketId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketComments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketComments {
    Table,
    Id,
    TicketId,
    UserId,
    Text,
    CreatedAt,
}
