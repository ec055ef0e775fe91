//! # Ticket Handlers
//!
//! Ticket lifecycle endpoints. Collaborateur identities only ever see
//! tickets assigned to them: the same ownership filter guards reads, status
//! changes and comments, so an out-of-scope ticket id yields `NotFound`.

use std::collections::{HashMap, HashSet};

use auth::{role::ADMIN_OR_ASSISTANT, Role};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    sea_orm_active_enums::{TicketEtat, TicketType},
    ticket_comments::{Column as CommentColumn, Entity as CommentsEntity},
    tickets::{Column as TicketColumn, Entity as TicketsEntity},
};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Select,
    Set,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        clients::{ClientRef, ClientResponse},
        tickets::{
            AddCommentRequest,
            AssignRequest,
            AuthorRef,
            CollaborateurRef,
            CommentResponse,
            CreateTicketRequest,
            DemandeurDetail,
            DemandeurRef,
            SetStatusRequest,
            TicketDetail,
            TicketSummary,
        },
    },
    lifecycle::{self, Transition},
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Base ticket query restricted to the caller's access scope.
///
/// Admin and assistant see everything; a collaborateur only the tickets
/// assigned to them.
fn scoped_tickets(user: &AuthenticatedUser) -> Select<TicketsEntity> {
    let query = TicketsEntity::find();
    if user.role == Role::Collaborateur {
        query.filter(TicketColumn::CollaborateurId.eq(user.id))
    }
    else {
        query
    }
}

/// List tickets in the caller's scope, newest first
pub async fn list_tickets_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<Vec<TicketSummary>>> {
    let tickets = scoped_tickets(&user)
        .order_by_desc(TicketColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let refs = load_ticket_refs(state, &tickets).await?;
    let summaries = tickets
        .iter()
        .map(|t| to_summary(t, &refs))
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(summaries))
}

/// List the five most recent tickets in the caller's scope
pub async fn recent_tickets_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<Vec<TicketSummary>>> {
    let tickets = scoped_tickets(&user)
        .order_by_desc(TicketColumn::CreatedAt)
        .limit(5)
        .all(&state.db)
        .await?;

    let refs = load_ticket_refs(state, &tickets).await?;
    let summaries = tickets
        .iter()
        .map(|t| to_summary(t, &refs))
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(summaries))
}

/// Get a ticket by id with the full comment thread
pub async fn get_ticket_handler(
    state: &AppState,
    user: AuthenticatedUser,
    ticket_id: Uuid,
) -> Result<Json<TicketDetail>> {
    let ticket = scoped_tickets(&user)
        .filter(TicketColumn::Id.eq(ticket_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket not found"))?;

    Ok(Json(to_detail(state, &ticket).await?))
}

/// Create a new ticket (admin/assistant)
pub async fn create_ticket_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateTicketRequest,
) -> Result<(StatusCode, Json<TicketSummary>)> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;
    req.validate().map_err(AppError::from)?;

    let ticket_type = match req.type_.as_deref() {
        None => TicketType::Bug,
        Some(value) => {
            TicketType::from_str(value)
                .ok_or_else(|| AppError::validation(format!("'{}' is not a valid ticket type", value)))?
        },
    };

    let client = entity::clients::Entity::find_by_id(req.client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    let demandeur = entity::demandeurs::Entity::find_by_id(req.demandeur_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Demandeur not found"))?;

    let now = Utc::now();
    let ticket = entity::tickets::ActiveModel {
        id:                Set(Uuid::new_v4()),
        client_id:         Set(client.id),
        demandeur_id:      Set(demandeur.id),
        collaborateur_id:  Set(None),
        etat:              Set(TicketEtat::Ouvert),
        r#type:            Set(ticket_type),
        observation:       Set(req.observation),
        mode_intervention: Set(req.mode_intervention),
        duree:             Set(0),
        date_resolution:   Set(None),
        created_at:        Set(now),
        updated_at:        Set(now),
    };

    let created = ticket.insert(&state.db).await?;

    info!(ticket_id = %created.id, client_id = %client.id, created_by = %user.id, "Ticket created");

    let refs = load_ticket_refs(state, std::slice::from_ref(&created)).await?;
    Ok((StatusCode::CREATED, Json(to_summary(&created, &refs)?)))
}

/// Change a ticket's status, applying the lifecycle state machine
pub async fn set_status_handler(
    state: &AppState,
    user: AuthenticatedUser,
    ticket_id: Uuid,
    req: SetStatusRequest,
) -> Result<Json<TicketSummary>> {
    req.validate().map_err(AppError::from)?;

    let requested = TicketEtat::from_str(&req.status)
        .ok_or_else(|| AppError::validation(format!("'{}' is not a valid status", req.status)))?;

    let ticket = scoped_tickets(&user)
        .filter(TicketColumn::Id.eq(ticket_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket not found"))?;

    let plan = lifecycle::plan_status_change(&ticket.etat, &requested, &user.role, ticket.created_at, Utc::now())?;

    let updated = match plan {
        Transition::Noop => ticket,
        Transition::Start => {
            let mut active_model: entity::tickets::ActiveModel = ticket.into();
            active_model.etat = Set(TicketEtat::EnCours);
            active_model.updated_at = Set(Utc::now());
            active_model.update(&state.db).await?
        },
        Transition::Close {
            date_resolution,
            duree,
        } => {
            let mut active_model: entity::tickets::ActiveModel = ticket.into();
            active_model.etat = Set(TicketEtat::Ferme);
            active_model.date_resolution = Set(Some(date_resolution));
            active_model.duree = Set(duree);
            active_model.updated_at = Set(Utc::now());
            active_model.update(&state.db).await?
        },
        Transition::Reopen => {
            let mut active_model: entity::tickets::ActiveModel = ticket.into();
            active_model.etat = Set(TicketEtat::Ouvert);
            active_model.updated_at = Set(Utc::now());
            active_model.update(&state.db).await?
        },
    };

    info!(ticket_id = %ticket_id, etat = %updated.etat, by = %user.id, "Ticket status updated");

    let refs = load_ticket_refs(state, std::slice::from_ref(&updated)).await?;
    Ok(Json(to_summary(&updated, &refs)?))
}

/// Assign a collaborateur to a ticket (admin/assistant)
///
/// Assignment is valid in any state; as a documented side effect an ouvert
/// ticket moves to en_cours.
pub async fn assign_handler(
    state: &AppState,
    user: AuthenticatedUser,
    ticket_id: Uuid,
    req: AssignRequest,
) -> Result<Json<TicketDetail>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;

    let ticket = TicketsEntity::find_by_id(ticket_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket not found"))?;

    let collaborateur = entity::users::Entity::find_by_id(req.collaborateur_id)
        .one(&state.db)
        .await?
        .filter(|u| u.role == Role::Collaborateur)
        .ok_or_else(|| AppError::not_found("Collaborateur not found"))?;

    let implied_etat = lifecycle::assignment_etat(&ticket.etat);

    let mut active_model: entity::tickets::ActiveModel = ticket.into();
    active_model.collaborateur_id = Set(Some(collaborateur.id));
    if let Some(etat) = implied_etat {
        active_model.etat = Set(etat);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model.update(&state.db).await?;

    info!(ticket_id = %ticket_id, collaborateur_id = %collaborateur.id, by = %user.id, "Ticket assigned");

    Ok(Json(to_detail(state, &updated).await?))
}

/// Append a comment to a ticket (any authenticated role within scope)
pub async fn add_comment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    ticket_id: Uuid,
    req: AddCommentRequest,
) -> Result<Json<TicketDetail>> {
    req.validate().map_err(AppError::from)?;

    let ticket = scoped_tickets(&user)
        .filter(TicketColumn::Id.eq(ticket_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket not found"))?;

    let comment = entity::ticket_comments::ActiveModel {
        ticket_id: Set(ticket.id),
        user_id: Set(user.id),
        text: Set(req.text),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    comment.insert(&state.db).await?;

    Ok(Json(to_detail(state, &ticket).await?))
}

/// Joined reference records for a batch of tickets.
struct TicketRefs {
    clients:        HashMap<Uuid, entity::clients::Model>,
    demandeurs:     HashMap<Uuid, entity::demandeurs::Model>,
    collaborateurs: HashMap<Uuid, entity::users::Model>,
}

/// Batch-load the client/demandeur/collaborateur records referenced by
/// `tickets`, one query per table.
async fn load_ticket_refs(state: &AppState, tickets: &[entity::tickets::Model]) -> Result<TicketRefs> {
    let client_ids: HashSet<Uuid> = tickets.iter().map(|t| t.client_id).collect();
    let demandeur_ids: HashSet<Uuid> = tickets.iter().map(|t| t.demandeur_id).collect();
    let collaborateur_ids: HashSet<Uuid> = tickets.iter().filter_map(|t| t.collaborateur_id).collect();

    let clients = entity::clients::Entity::find()
        .filter(entity::clients::Column::Id.is_in(client_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let demandeurs = entity::demandeurs::Entity::find()
        .filter(entity::demandeurs::Column::Id.is_in(demandeur_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    let collaborateurs = entity::users::Entity::find()
        .filter(entity::users::Column::Id.is_in(collaborateur_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(TicketRefs {
        clients,
        demandeurs,
        collaborateurs,
    })
}

/// Build the list shape of a ticket from preloaded references.
fn to_summary(ticket: &entity::tickets::Model, refs: &TicketRefs) -> Result<TicketSummary> {
    let client = refs
        .clients
        .get(&ticket.client_id)
        .ok_or_else(|| AppError::database(format!("Ticket {} references a missing client", ticket.id)))?;
    let demandeur = refs
        .demandeurs
        .get(&ticket.demandeur_id)
        .ok_or_else(|| AppError::database(format!("Ticket {} references a missing demandeur", ticket.id)))?;
    let collaborateur = ticket
        .collaborateur_id
        .and_then(|id| refs.collaborateurs.get(&id))
        .map(CollaborateurRef::from_model);

    Ok(TicketSummary {
        id:                ticket.id,
        client:            ClientRef::from_model(client),
        demandeur:         DemandeurRef::from_model(demandeur),
        collaborateur,
        etat:              ticket.etat.to_string(),
        type_:             ticket.r#type.to_string(),
        observation:       ticket.observation.clone(),
        mode_intervention: ticket.mode_intervention.clone(),
        duree:             ticket.duree,
        date_resolution:   ticket.date_resolution.map(|dt| dt.to_rfc3339()),
        date:              ticket.created_at.to_rfc3339(),
    })
}

/// Build the detail shape of a ticket, including the ordered comment thread.
async fn to_detail(state: &AppState, ticket: &entity::tickets::Model) -> Result<TicketDetail> {
    let refs = load_ticket_refs(state, std::slice::from_ref(ticket)).await?;

    let client = refs
        .clients
        .get(&ticket.client_id)
        .ok_or_else(|| AppError::database(format!("Ticket {} references a missing client", ticket.id)))?;
    let demandeur = refs
        .demandeurs
        .get(&ticket.demandeur_id)
        .ok_or_else(|| AppError::database(format!("Ticket {} references a missing demandeur", ticket.id)))?;
    let collaborateur = ticket
        .collaborateur_id
        .and_then(|id| refs.collaborateurs.get(&id))
        .map(CollaborateurRef::from_model);

    // Insertion order is the display order
    let comments = CommentsEntity::find()
        .filter(CommentColumn::TicketId.eq(ticket.id))
        .order_by_asc(CommentColumn::Id)
        .all(&state.db)
        .await?;

    let author_ids: HashSet<Uuid> = comments.iter().map(|c| c.user_id).collect();
    let authors: HashMap<Uuid, entity::users::Model> = entity::users::Entity::find()
        .filter(entity::users::Column::Id.is_in(author_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let comments = comments
        .iter()
        .map(|c| {
            CommentResponse {
                id:         c.id,
                user:       authors.get(&c.user_id).map(|u| {
                    AuthorRef {
                        id:     u.id,
                        nom:    u.nom.clone(),
                        prenom: u.prenom.clone(),
                    }
                }),
                text:       c.text.clone(),
                created_at: c.created_at.to_rfc3339(),
            }
        })
        .collect();

    Ok(TicketDetail {
        id:                ticket.id,
        client:            ClientResponse::from_model(client),
        demandeur:         DemandeurDetail::from_model(demandeur),
        collaborateur,
        etat:              ticket.etat.to_string(),
        type_:             ticket.r#type.to_string(),
        observation:       ticket.observation.clone(),
        mode_intervention: ticket.mode_intervention.clone(),
        duree:             ticket.duree,
        date_resolution:   ticket.date_resolution.map(|dt| dt.to_rfc3339()),
        date:              ticket.created_at.to_rfc3339(),
        comments,
    })
}
