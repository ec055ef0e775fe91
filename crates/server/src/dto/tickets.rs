//! # Ticket Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::clients::{ClientRef, ClientResponse};

/// Minimal demandeur reference embedded in ticket responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandeurRef {
    pub id:     Uuid,
    pub nom:    String,
    pub prenom: String,
}

impl DemandeurRef {
    #[must_use]
    pub fn from_model(demandeur: &entity::demandeurs::Model) -> Self {
        Self {
            id:     demandeur.id,
            nom:    demandeur.nom.clone(),
            prenom: demandeur.prenom.clone(),
        }
    }
}

/// Collaborateur reference embedded in ticket responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaborateurRef {
    pub id:         Uuid,
    pub nom:        String,
    pub prenom:     String,
    pub specialite: Option<String>,
}

impl CollaborateurRef {
    #[must_use]
    pub fn from_model(user: &entity::users::Model) -> Self {
        Self {
            id:         user.id,
            nom:        user.nom.clone(),
            prenom:     user.prenom.clone(),
            specialite: user.specialite.clone(),
        }
    }
}

/// Comment author reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub id:     Uuid,
    pub nom:    String,
    pub prenom: String,
}

/// A single ticket comment, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    pub id:         i32,
    pub user:       Option<AuthorRef>,
    pub text:       String,
    /// Comment timestamp, RFC 3339
    pub created_at: String,
}

/// Ticket list entry with joined display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    pub id:                Uuid,
    pub client:            ClientRef,
    pub demandeur:         DemandeurRef,
    pub collaborateur:     Option<CollaborateurRef>,
    /// ouvert, en_cours or ferme
    pub etat:              String,
    /// bug, feature, support or autre
    #[serde(rename = "type")]
    pub type_:             String,
    pub observation:       String,
    pub mode_intervention: Option<String>,
    /// Resolution time in whole hours, 0 until closure
    pub duree:             i32,
    /// Resolution timestamp, RFC 3339, set at closure
    pub date_resolution:   Option<String>,
    /// Creation timestamp, RFC 3339
    pub date:              String,
}

/// Ticket detail with full references and the ordered comment thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDetail {
    pub id:                Uuid,
    pub client:            ClientResponse,
    pub demandeur:         DemandeurDetail,
    pub collaborateur:     Option<CollaborateurRef>,
    pub etat:              String,
    #[serde(rename = "type")]
    pub type_:             String,
    pub observation:       String,
    pub mode_intervention: Option<String>,
    pub duree:             i32,
    pub date_resolution:   Option<String>,
    pub date:              String,
    pub comments:          Vec<CommentResponse>,
}

/// Demandeur fields joined into the ticket detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandeurDetail {
    pub id:        Uuid,
    pub nom:       String,
    pub prenom:    String,
    pub telephone: String,
    pub email:     String,
    pub fonction:  String,
}

impl DemandeurDetail {
    #[must_use]
    pub fn from_model(demandeur: &entity::demandeurs::Model) -> Self {
        Self {
            id:        demandeur.id,
            nom:       demandeur.nom.clone(),
            prenom:    demandeur.prenom.clone(),
            telephone: demandeur.telephone.clone(),
            email:     demandeur.email.clone(),
            fonction:  demandeur.fonction.clone(),
        }
    }
}

/// Request to create a new ticket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicketRequest {
    pub client_id:         Uuid,
    pub demandeur_id:      Uuid,
    #[validate(length(min = 1, message = "observation is required"))]
    pub observation:       String,
    /// Ticket type wire value; defaults to bug when absent
    #[serde(rename = "type")]
    pub type_:             Option<String>,
    pub mode_intervention: Option<String>,
}

/// Request to change a ticket's status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetStatusRequest {
    /// Requested etat wire value (ouvert, en_cours, ferme)
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

/// Request to assign a collaborateur to a ticket
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRequest {
    pub collaborateur_id: Uuid,
}

/// Request to append a comment to a ticket
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
