//! # Session Handlers
//!
//! Login and one-time initial-admin bootstrap. Both endpoints are public;
//! everything else sits behind the JWT middleware.

use auth::{
    password::{hash_password, verify_password},
    secrecy::{ExposeSecret, SecretString},
    Role,
};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::users::{Column as UserColumn, Entity as UsersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        auth::{InitialAdminRequest, LoginRequest, LoginResponse},
        users::UserResponse,
    },
    AppState,
};

/// Inner handler for the login endpoint.
///
/// Unknown email and wrong password are deliberately indistinguishable to the
/// caller.
pub async fn login_handler_inner(state: &AppState, req: LoginRequest) -> Result<Json<LoginResponse>> {
    req.validate().map_err(AppError::from)?;

    let user = UsersEntity::find()
        .filter(UserColumn::Email.eq(&req.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    let password = SecretString::from(req.password);
    verify_password(&password, &user.password_hash)
        .map_err(|_| AppError::unauthorized("Invalid email or password"))?;

    let token = auth::create_access_token(
        &state.jwt_config,
        &user.id.to_string(),
        &user.email,
        &user.role.to_string(),
    )?;

    info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from_model(&user),
    }))
}

/// Inner handler for the initial-admin bootstrap endpoint.
///
/// Accepted only while no admin account exists; afterwards user creation goes
/// through the admin-gated endpoint.
pub async fn initial_admin_handler_inner(
    state: &AppState,
    req: InitialAdminRequest,
) -> Result<(StatusCode, Json<UserResponse>)> {
    req.validate().map_err(AppError::from)?;

    let admin_count = UsersEntity::find()
        .filter(UserColumn::Role.eq(Role::Admin))
        .count(&state.db)
        .await?;

    if admin_count > 0 {
        return Err(AppError::conflict("An admin user already exists"));
    }

    let password = SecretString::from(req.password);
    let password_hash =
        hash_password(&password, None).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let admin = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        nom:           Set(req.nom),
        prenom:        Set(req.prenom),
        email:         Set(req.email),
        role:          Set(Role::Admin),
        specialite:    Set(None),
        password_hash: Set(password_hash.expose_secret().to_string()),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = admin.insert(&state.db).await?;

    info!(user_id = %created.id, email = %created.email, "Initial admin created");

    Ok((StatusCode::CREATED, Json(UserResponse::from_model(&created))))
}
