//! # Client Handlers
//!
//! CRUD for the client registry. Deletion is blocked while any demandeur
//! references the client, so the registry never holds orphan demandeurs.

use auth::role::ADMIN_OR_ASSISTANT;
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    clients::{Column as ClientColumn, Entity as ClientsEntity},
    demandeurs::{Column as DemandeurColumn, Entity as DemandeursEntity},
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        clients::{ClientResponse, CreateClientRequest, UpdateClientRequest},
        demandeurs::DemandeurResponse,
        SuccessResponse,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// List all clients, sorted by nom (any authenticated role)
pub async fn list_clients_handler(state: &AppState, _user: AuthenticatedUser) -> Result<Json<Vec<ClientResponse>>> {
    let clients = ClientsEntity::find()
        .order_by_asc(ClientColumn::Nom)
        .all(&state.db)
        .await?;

    Ok(Json(clients.iter().map(ClientResponse::from_model).collect()))
}

/// Get a client by id (any authenticated role)
pub async fn get_client_handler(
    state: &AppState,
    _user: AuthenticatedUser,
    client_id: Uuid,
) -> Result<Json<ClientResponse>> {
    let client = ClientsEntity::find_by_id(client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    Ok(Json(ClientResponse::from_model(&client)))
}

/// Create a new client (admin/assistant)
pub async fn create_client_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateClientRequest,
) -> Result<(StatusCode, Json<ClientResponse>)> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;
    req.validate().map_err(AppError::from)?;

    let existing = ClientsEntity::find()
        .filter(ClientColumn::Email.eq(&req.email))
        .count(&state.db)
        .await?;
    if existing > 0 {
        return Err(AppError::validation("A client with this email already exists"));
    }

    let client = entity::clients::ActiveModel {
        id:         Set(Uuid::new_v4()),
        nom:        Set(req.nom),
        telephone:  Set(req.telephone),
        email:      Set(req.email),
        adresse:    Set(req.adresse),
        created_at: Set(Utc::now()),
    };

    let created = client.insert(&state.db).await?;

    info!(client_id = %created.id, created_by = %user.id, "Client created");

    Ok((StatusCode::CREATED, Json(ClientResponse::from_model(&created))))
}

/// Update a client; absent fields are left unchanged (admin/assistant)
pub async fn update_client_handler(
    state: &AppState,
    user: AuthenticatedUser,
    client_id: Uuid,
    req: UpdateClientRequest,
) -> Result<Json<ClientResponse>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;
    req.validate().map_err(AppError::from)?;

    let client = ClientsEntity::find_by_id(client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    let mut active_model: entity::clients::ActiveModel = client.into();
    if let Some(nom) = req.nom {
        active_model.nom = Set(nom);
    }
    if let Some(telephone) = req.telephone {
        active_model.telephone = Set(telephone);
    }
    if let Some(email) = req.email {
        active_model.email = Set(email);
    }
    if let Some(adresse) = req.adresse {
        active_model.adresse = Set(adresse);
    }

    let updated = active_model.update(&state.db).await?;

    Ok(Json(ClientResponse::from_model(&updated)))
}

/// Delete a client (admin/assistant)
///
/// Fails with `Conflict` while any demandeur references the client.
pub async fn delete_client_handler(
    state: &AppState,
    user: AuthenticatedUser,
    client_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;

    let client = ClientsEntity::find_by_id(client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    let demandeur_count = DemandeursEntity::find()
        .filter(DemandeurColumn::ClientId.eq(client_id))
        .count(&state.db)
        .await?;

    if demandeur_count > 0 {
        return Err(AppError::conflict(
            "Cannot delete this client because demandeurs still reference it",
        ));
    }

    client.delete(&state.db).await?;

    info!(client_id = %client_id, deleted_by = %user.id, "Client deleted");

    Ok(Json(SuccessResponse::new("Client deleted successfully")))
}

/// List the demandeurs of a client, sorted by nom (any authenticated role)
pub async fn client_demandeurs_handler(
    state: &AppState,
    _user: AuthenticatedUser,
    client_id: Uuid,
) -> Result<Json<Vec<DemandeurResponse>>> {
    let client = ClientsEntity::find_by_id(client_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Client not found"))?;

    let demandeurs = DemandeursEntity::find()
        .filter(DemandeurColumn::ClientId.eq(client_id))
        .order_by_asc(DemandeurColumn::Nom)
        .all(&state.db)
        .await?;

    Ok(Json(
        demandeurs
            .iter()
            .map(|d| DemandeurResponse::from_models(d, &client))
            .collect(),
    ))
}
