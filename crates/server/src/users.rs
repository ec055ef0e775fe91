//! # User Handlers
//!
//! Profile self-service, admin user management and the collaborateur
//! directory.

use auth::{
    password::{hash_password, verify_password},
    role::{ADMIN_ONLY, ADMIN_OR_ASSISTANT},
    secrecy::{ExposeSecret, SecretString},
    Role,
};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::users::{Column as UserColumn, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        users::{
            ChangePasswordRequest,
            CollaborateurResponse,
            CreateUserRequest,
            UpdateMyProfileRequest,
            UserResponse,
        },
        SuccessResponse,
    },
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Get the authenticated user's profile
pub async fn get_my_profile_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<UserResponse>> {
    let db_user = UsersEntity::find_by_id(user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from_model(&db_user)))
}

/// Update the authenticated user's profile (nom, prenom, email)
pub async fn update_my_profile_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: UpdateMyProfileRequest,
) -> Result<Json<UserResponse>> {
    req.validate().map_err(AppError::from)?;

    let db_user = UsersEntity::find_by_id(user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(ref email) = req.email {
        if *email != db_user.email {
            ensure_email_free(state, email).await?;
        }
    }

    let mut active_model: entity::users::ActiveModel = db_user.into();
    if let Some(nom) = req.nom {
        active_model.nom = Set(nom);
    }
    if let Some(prenom) = req.prenom {
        active_model.prenom = Set(prenom);
    }
    if let Some(email) = req.email {
        active_model.email = Set(email);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model.update(&state.db).await?;

    info!(user_id = %user.id, "User profile updated");

    Ok(Json(UserResponse::from_model(&updated)))
}

/// Change the authenticated user's password
pub async fn change_password_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: ChangePasswordRequest,
) -> Result<Json<SuccessResponse>> {
    req.validate().map_err(AppError::from)?;

    let db_user = UsersEntity::find_by_id(user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let current = SecretString::from(req.current_password);
    verify_password(&current, &db_user.password_hash)
        .map_err(|_| AppError::bad_request("Current password is incorrect"))?;

    let new_password = SecretString::from(req.new_password);
    let password_hash = hash_password(&new_password, None)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let mut active_model: entity::users::ActiveModel = db_user.into();
    active_model.password_hash = Set(password_hash.expose_secret().to_string());
    active_model.updated_at = Set(Utc::now());
    active_model.update(&state.db).await?;

    info!(user_id = %user.id, "Password changed");

    Ok(Json(SuccessResponse::new("Password updated successfully")))
}

/// List all users, sorted by nom (admin only)
pub async fn list_users_handler(state: &AppState, user: AuthenticatedUser) -> Result<Json<Vec<UserResponse>>> {
    auth::require_any(&user.role, ADMIN_ONLY)?;

    let users = UsersEntity::find()
        .order_by_asc(UserColumn::Nom)
        .all(&state.db)
        .await?;

    Ok(Json(users.iter().map(UserResponse::from_model).collect()))
}

/// Create a new user (admin only)
///
/// A collaborateur account requires a specialite; for other roles the field
/// is discarded.
pub async fn create_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateUserRequest,
) -> Result<(StatusCode, Json<UserResponse>)> {
    auth::require_any(&user.role, ADMIN_ONLY)?;
    req.validate().map_err(AppError::from)?;

    let role = Role::from_str(&req.role)
        .ok_or_else(|| AppError::validation(format!("'{}' is not a valid role", req.role)))?;

    let specialite = match role {
        Role::Collaborateur => {
            match req.specialite.as_deref() {
                Some(s) if !s.trim().is_empty() => Some(s.to_string()),
                _ => {
                    return Err(AppError::validation(
                        "specialite is required for collaborator accounts",
                    ));
                },
            }
        },
        Role::Admin | Role::Assistant => None,
    };

    ensure_email_free(state, &req.email).await?;

    let password = SecretString::from(req.password);
    let password_hash =
        hash_password(&password, None).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let new_user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        nom:           Set(req.nom),
        prenom:        Set(req.prenom),
        email:         Set(req.email),
        role:          Set(role),
        specialite:    Set(specialite),
        password_hash: Set(password_hash.expose_secret().to_string()),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = new_user.insert(&state.db).await?;

    info!(user_id = %created.id, role = %created.role, created_by = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from_model(&created))))
}

/// Delete a user (admin only)
///
/// Blocked while the user is referenced by any ticket assignment or comment,
/// so ticket history never loses its author or collaborateur.
pub async fn delete_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    user_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    auth::require_any(&user.role, ADMIN_ONLY)?;

    let db_user = UsersEntity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let assigned = entity::tickets::Entity::find()
        .filter(entity::tickets::Column::CollaborateurId.eq(user_id))
        .count(&state.db)
        .await?;
    let commented = entity::ticket_comments::Entity::find()
        .filter(entity::ticket_comments::Column::UserId.eq(user_id))
        .count(&state.db)
        .await?;

    if assigned > 0 || commented > 0 {
        return Err(AppError::conflict(
            "Cannot delete this user because tickets still reference them",
        ));
    }

    db_user.delete(&state.db).await?;

    info!(user_id = %user_id, deleted_by = %user.id, "User deleted");

    Ok(Json(SuccessResponse::new("User deleted successfully")))
}

/// List collaborateurs, sorted by nom (admin/assistant)
pub async fn list_collaborateurs_handler(
    state: &AppState,
    user: AuthenticatedUser,
) -> Result<Json<Vec<CollaborateurResponse>>> {
    auth::require_any(&user.role, ADMIN_OR_ASSISTANT)?;

    let collaborateurs = UsersEntity::find()
        .filter(UserColumn::Role.eq(Role::Collaborateur))
        .order_by_asc(UserColumn::Nom)
        .all(&state.db)
        .await?;

    Ok(Json(
        collaborateurs
            .iter()
            .map(|c| {
                CollaborateurResponse {
                    id:         c.id,
                    nom:        c.nom.clone(),
                    prenom:     c.prenom.clone(),
                    specialite: c.specialite.clone(),
                }
            })
            .collect(),
    ))
}

/// Reject an email that is already taken by another account.
async fn ensure_email_free(state: &AppState, email: &str) -> Result<()> {
    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(email))
        .count(&state.db)
        .await?;

    if existing > 0 {
        return Err(AppError::validation("A user with this email already exists"));
    }

    Ok(())
}
