//! # Statistics Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for the admin statistics endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatsPeriodQuery {
    /// Optional window anchored to now: week, month or year
    pub period: Option<String>,
}

/// One entry of the ticket-type distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketTypeStat {
    /// Display label (Bug, Fonctionnalité, Support, Autre)
    pub name:       String,
    pub count:      i64,
    /// round(100 * count / total); 0 when total is 0
    pub percentage: i64,
}

/// One entry of the top-collaborateur ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCollaborateur {
    pub id:            Uuid,
    pub nom:           String,
    pub prenom:        String,
    pub specialite:    Option<String>,
    pub tickets_count: i64,
}

/// One entry of the top-client ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopClient {
    pub id:            Uuid,
    pub nom:           String,
    pub tickets_count: i64,
}

/// Full dashboard rollup for administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStatisticsResponse {
    pub total_tickets:        u64,
    pub open_tickets:         u64,
    pub closed_tickets:       u64,
    pub total_clients:        u64,
    /// Distinct demandeurs across the matching tickets
    pub total_demandeurs:     u64,
    pub total_collaborateurs: u64,
    pub tickets_by_type:      Vec<TicketTypeStat>,
    pub top_collaborateurs:   Vec<TopCollaborateur>,
    pub top_clients:          Vec<TopClient>,
    /// Average duree over closed tickets with duree > 0, rounded; 0 when none
    pub avg_resolution_time:  i64,
}

/// Reduced rollup for assistants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantStatisticsResponse {
    pub total_tickets:    u64,
    pub open_tickets:     u64,
    pub closed_tickets:   u64,
    pub total_clients:    u64,
    /// Total demandeur records (not distinct-by-ticket)
    pub total_demandeurs: u64,
}
