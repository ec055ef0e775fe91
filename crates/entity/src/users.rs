//! Users Entity
//!
//! Actors of the system: admins, assistants and collaborateurs. The password
//! hash never leaves the server; response DTOs are built without it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::Role;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    pub nom:           String,
    pub prenom:        String,
    #[sea_orm(unique)]
    pub email:         String,
    pub role:          Role,
    /// Required when `role` is collaborateur, absent otherwise
    pub specialite:    Option<String>,
    pub password_hash: String,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tickets::Entity")]
    AssignedTickets,
    #[sea_orm(has_many = "super::ticket_comments::Entity")]
    Comments,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::AssignedTickets.def() }
}

impl Related<super::ticket_comments::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl ActiveModelBehavior for ActiveModel {}
