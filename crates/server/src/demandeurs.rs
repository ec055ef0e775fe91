//! # Demandeur Handlers
//!
//! CRUD for contact persons. Every demandeur belongs to exactly one client;
//! list and detail responses join the owning client. Deletion is blocked
//! while tickets reference the demandeur, mirroring the client-side guard.

use auth::role::ADMIN_OR_ASSISTANT;
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    clients::Entity as ClientsEntity,
    demandeurs::{Column as DemandeurColumn, Entity as DemandeursEntity},
    tickets::{Column as TicketColumn, Entity as TicketsEntity},
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        demandeurs::{CreateDemandeurRequest, DemandeurDetailResponse, DemandeurResponse, UpdateDemandeurRequest},
        SuccessResponse,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// List all demandeurs with their owning client, sorted by nom
pub async fn list_demandeurs_handler(
    state: &AppState,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<DemandeurResponse>>> {
    let rows = DemandeursEntity::find()
        .find_also_related(ClientsEntity)
        .order_by_asc(DemandeurColumn::Nom)
        .all(&state.db)
        .await?;

    let mut responses = Vec::with_capacity(rows.len());
    for (demandeur, client) in &rows {
        let client = client
            .as_ref()
            .ok_or_else(|| AppError::database(format!("Demandeur {} has no client", demandeur.id)))?;
        responses.push(DemandeurResponse::from_models(demandeur, client));
    }

    Ok(Json(responses))
}

/// Get a demandeur by id with the full owning client record
pub async fn get_demandeur_handler(
    state: &AppState,
    _user: AuthenticatedUser,
    demandeur_id: Uuid,
) -> Result<Json<DemandeurDetailResponse>> {
    let (demandeur, client) = DemandeursEntity::find_by_id(demandeur_id)
        .find_also_related(ClientsEntity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Demandeur not found"))?;

    let client = client.ok_or_else(|| AppError::database(format!("Demandeur {} has no client", demandeur_id)))?;

    Ok(Json(DemandeurDetailResponse::from_models(&demandeur, &client)))
}

/// Create a new demandeur under an existing client (admin/assistant)
pub async fn create_demandeur_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateDemandeurRequest,
) -> Result<(StatusCode, Json<DemandeurResponse>)> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;
    req.validate().map_err(AppError::from)?;

    let client = ClientsEntity::find_by_id(req.client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    let demandeur = entity::demandeurs::ActiveModel {
        id:         Set(Uuid::new_v4()),
        nom:        Set(req.nom),
        prenom:     Set(req.prenom),
        telephone:  Set(req.telephone),
        email:      Set(req.email),
        fonction:   Set(req.fonction),
        client_id:  Set(client.id),
        created_at: Set(Utc::now()),
    };

    let created = demandeur.insert(&state.db).await?;

    info!(demandeur_id = %created.id, client_id = %client.id, created_by = %user.id, "Demandeur created");

    Ok((
        StatusCode::CREATED,
        Json(DemandeurResponse::from_models(&created, &client)),
    ))
}

/// Update a demandeur; absent fields are left unchanged (admin/assistant)
///
/// A changed `client_id` is re-validated against the client registry.
pub async fn update_demandeur_handler(
    state: &AppState,
    user: AuthenticatedUser,
    demandeur_id: Uuid,
    req: UpdateDemandeurRequest,
) -> Result<Json<DemandeurResponse>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;
    req.validate().map_err(AppError::from)?;

    let demandeur = DemandeursEntity::find_by_id(demandeur_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Demandeur not found"))?;

    if let Some(client_id) = req.client_id {
        let exists = ClientsEntity::find_by_id(client_id).count(&state.db).await?;
        if exists == 0 {
            return Err(AppError::not_found("Client not found"));
        }
    }

    let mut active_model: entity::demandeurs::ActiveModel = demandeur.into();
    if let Some(nom) = req.nom {
        active_model.nom = Set(nom);
    }
    if let Some(prenom) = req.prenom {
        active_model.prenom = Set(prenom);
    }
    if let Some(telephone) = req.telephone {
        active_model.telephone = Set(telephone);
    }
    if let Some(email) = req.email {
        active_model.email = Set(email);
    }
    if let Some(fonction) = req.fonction {
        active_model.fonction = Set(fonction);
    }
    if let Some(client_id) = req.client_id {
        active_model.client_id = Set(client_id);
    }

    let updated = active_model.update(&state.db).await?;

    let client = ClientsEntity::find_by_id(updated.client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::database(format!("Demandeur {} has no client", updated.id)))?;

    Ok(Json(DemandeurResponse::from_models(&updated, &client)))
}

/// Delete a demandeur (admin/assistant)
///
/// Fails with `Conflict` while any ticket references the demandeur.
pub async fn delete_demandeur_handler(
    state: &AppState,
    user: AuthenticatedUser,
    demandeur_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;

    let demandeur = DemandeursEntity::find_by_id(demandeur_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Demandeur not found"))?;

    let ticket_count = TicketsEntity::find()
        .filter(TicketColumn::DemandeurId.eq(demandeur_id))
        .count(&state.db)
        .await?;

    if ticket_count > 0 {
        return Err(AppError::conflict(
            "Cannot delete this demandeur because tickets still reference them",
        ));
    }

    demandeur.delete(&state.db).await?;

    info!(demandeur_id = %demandeur_id, deleted_by = %user.id, "Demandeur deleted");

    Ok(Json(SuccessResponse::new("Demandeur deleted successfully")))
}
