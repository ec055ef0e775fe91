//! # Authentication Middleware
//!
//! JWT authentication middleware for protecting API endpoints. The identity
//! extracted here is inserted as a request extension and threaded as an
//! explicit parameter into every inner handler; no handler reads an ambient
//! current user.

use auth::{extract_bearer_token, validate_token, Role};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use error::AppError;
use uuid::Uuid;

use crate::AppState;

/// User information extracted from the JWT token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID
    pub id:    Uuid,
    /// User email
    pub email: String,
    /// User role
    pub role:  Role,
}

/// Authentication middleware
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT token
/// 3. Adds the authenticated user to request extensions
/// 4. Rejects requests with invalid or missing tokens
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header_value = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => {
            match value.to_str() {
                Ok(value) => value,
                Err(_) => {
                    return AppError::unauthorized("Invalid authorization header encoding").into_response();
                },
            }
        },
        None => {
            return AppError::unauthorized("Missing authorization header").into_response();
        },
    };

    let token = match extract_bearer_token(header_value) {
        Some(token) => token,
        None => {
            return AppError::unauthorized("Invalid authorization header format").into_response();
        },
    };

    let claims = match validate_token(&state.jwt_config, &token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => {
            return AppError::unauthorized("Invalid token subject").into_response();
        },
    };

    let role = match Role::from_str(&claims.role) {
        Some(role) => role,
        None => {
            return AppError::unauthorized("Invalid token role").into_response();
        },
    };

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        email: claims.email,
        role,
    });

    next.run(request).await
}
