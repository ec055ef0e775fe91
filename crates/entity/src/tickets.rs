//! Tickets Entity
//!
//! The central mutable entity of the system. `created_at` is immutable after
//! insertion; `date_resolution` and `duree` are written only when a ticket
//! transitions into the `ferme` state.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::{TicketEtat, TicketType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                Uuid,
    pub client_id:         Uuid,
    pub demandeur_id:      Uuid,
    /// Assigned later; optional until then
    pub collaborateur_id:  Option<Uuid>,
    pub etat:              TicketEtat,
    pub r#type:            TicketType,
    /// Problem description as reported by the demandeur
    #[sea_orm(column_type = "Text")]
    pub observation:       String,
    pub mode_intervention: Option<String>,
    /// Resolution time in whole hours, 0 until closure
    pub duree:             i32,
    pub date_resolution:   Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:        chrono::DateTime<chrono::Utc>,
    pub updated_at:        chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::demandeurs::Entity",
        from = "Column::DemandeurId",
        to = "super::demandeurs::Column::Id"
    )]
    Demandeur,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CollaborateurId",
        to = "super::users::Column::Id"
    )]
    Collaborateur,
    #[sea_orm(has_many = "super::ticket_comments::Entity")]
    Comments,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<super::demandeurs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Demandeur.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Collaborateur.def() }
}

impl Related<super::ticket_comments::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl ActiveModelBehavior for ActiveModel {}
