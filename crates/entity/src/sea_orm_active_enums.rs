//! Active enum definitions shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Actor role enumeration
///
/// Exactly one role per user; collaborateurs additionally carry a required
/// `specialite` on the user record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum Role {
    /// Full administrative access, including user management and statistics
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Front-desk staff: manages clients, demandeurs and tickets
    #[sea_orm(string_value = "assistant")]
    Assistant,
    /// Support staff resolving the tickets assigned to them
    #[sea_orm(string_value = "collaborator")]
    Collaborateur,
}

impl Role {
    /// Parse a role from its wire representation.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "assistant" => Some(Role::Assistant),
            "collaborator" => Some(Role::Collaborateur),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Assistant => write!(f, "assistant"),
            Role::Collaborateur => write!(f, "collaborator"),
        }
    }
}

/// Ticket status enumeration
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_etat")]
pub enum TicketEtat {
    /// Newly created, not yet picked up
    #[sea_orm(string_value = "ouvert")]
    Ouvert,
    /// Being worked on by a collaborateur
    #[sea_orm(string_value = "en_cours")]
    EnCours,
    /// Resolved; `date_resolution` and `duree` are set
    #[sea_orm(string_value = "ferme")]
    Ferme,
}

impl TicketEtat {
    /// Parse a status from its wire representation.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ouvert" => Some(TicketEtat::Ouvert),
            "en_cours" => Some(TicketEtat::EnCours),
            "ferme" => Some(TicketEtat::Ferme),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketEtat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketEtat::Ouvert => write!(f, "ouvert"),
            TicketEtat::EnCours => write!(f, "en_cours"),
            TicketEtat::Ferme => write!(f, "ferme"),
        }
    }
}

/// Ticket type enumeration
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_type")]
pub enum TicketType {
    #[sea_orm(string_value = "bug")]
    Bug,
    #[sea_orm(string_value = "feature")]
    Feature,
    #[sea_orm(string_value = "support")]
    Support,
    #[sea_orm(string_value = "autre")]
    Autre,
}

impl TicketType {
    /// Parse a type from its wire representation.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bug" => Some(TicketType::Bug),
            "feature" => Some(TicketType::Feature),
            "support" => Some(TicketType::Support),
            "autre" => Some(TicketType::Autre),
            _ => None,
        }
    }

    /// Display label used by the statistics endpoint.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Bug => "Bug",
            TicketType::Feature => "Fonctionnalité",
            TicketType::Support => "Support",
            TicketType::Autre => "Autre",
        }
    }
}

impl std::fmt::Display for TicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketType::Bug => write!(f, "bug"),
            TicketType::Feature => write!(f, "feature"),
            TicketType::Support => write!(f, "support"),
            TicketType::Autre => write!(f, "autre"),
        }
    }
}
