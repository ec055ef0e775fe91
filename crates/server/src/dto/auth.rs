//! # Authentication Data Transfer Objects
//!
//! Request and response types for the login and bootstrap endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::users::UserResponse;

/// Request to log in with email and password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user:  UserResponse,
}

/// Request to create the first admin account
///
/// Only accepted while no admin exists; afterwards user creation goes through
/// the admin-gated endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InitialAdminRequest {
    #[validate(length(min = 1, max = 255, message = "nom is required"))]
    pub nom:      String,
    #[validate(length(min = 1, max = 255, message = "prenom is required"))]
    pub prenom:   String,
    #[validate(email(message = "Invalid email format"))]
    pub email:    String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}
