//! Clients Entity
//!
//! Organizations on whose behalf demandeurs raise tickets.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         Uuid,
    pub nom:        String,
    pub telephone:  String,
    pub email:      String,
    pub adresse:    String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::demandeurs::Entity")]
    Demandeurs,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::demandeurs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Demandeurs.def() }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tickets.def() }
}

impl ActiveModelBehavior for ActiveModel {}
