//! Demandeurs Entity
//!
//! Contact persons; each belongs to exactly one client.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "demandeurs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         Uuid,
    pub nom:        String,
    pub prenom:     String,
    pub telephone:  String,
    pub email:      String,
    pub fonction:   String,
    pub client_id:  Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tickets.def() }
}

impl ActiveModelBehavior for ActiveModel {}
