//! # User Data Transfer Objects
//!
//! Request and response types for user management endpoints. The password
//! hash is never part of a response type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Response for a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    /// User's unique identifier
    pub id:         Uuid,
    /// Family name
    pub nom:        String,
    /// Given name
    pub prenom:     String,
    /// Email address
    pub email:      String,
    /// Role (admin, assistant, collaborator)
    pub role:       String,
    /// Specialty, present for collaborateurs only
    pub specialite: Option<String>,
}

impl UserResponse {
    /// Convert a user entity model into its response shape.
    #[must_use]
    pub fn from_model(user: &entity::users::Model) -> Self {
        Self {
            id:         user.id,
            nom:        user.nom.clone(),
            prenom:     user.prenom.clone(),
            email:      user.email.clone(),
            role:       user.role.to_string(),
            specialite: user.specialite.clone(),
        }
    }
}

/// Request to create a new user (admin operation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "nom is required"))]
    pub nom:        String,
    #[validate(length(min = 1, max = 255, message = "prenom is required"))]
    pub prenom:     String,
    #[validate(email(message = "Invalid email format"))]
    pub email:      String,
    /// Role wire value (admin, assistant, collaborator)
    pub role:       String,
    /// Required when role is collaborator
    pub specialite: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password:   String,
}

/// Request to update the caller's own profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMyProfileRequest {
    #[validate(length(min = 1, max = 255, message = "nom must not be empty"))]
    pub nom:    Option<String>,
    #[validate(length(min = 1, max = 255, message = "prenom must not be empty"))]
    pub prenom: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:  Option<String>,
}

/// Request to change the caller's password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password:     String,
}

/// Response entry for the collaborateur directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaborateurResponse {
    pub id:         Uuid,
    pub nom:        String,
    pub prenom:     String,
    pub specialite: Option<String>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let req = CreateUserRequest {
            nom:        "Durand".to_string(),
            prenom:     "Alice".to_string(),
            email:      "not-an-email".to_string(),
            role:       "admin".to_string(),
            specialite: None,
            password:   "longenough".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_short_password() {
        let req = CreateUserRequest {
            nom:        "Durand".to_string(),
            prenom:     "Alice".to_string(),
            email:      "alice@example.com".to_string(),
            role:       "admin".to_string(),
            specialite: None,
            password:   "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_allows_partial() {
        let req = UpdateMyProfileRequest {
            nom:    None,
            prenom: Some("Benoit".to_string()),
            email:  None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_profile_request_validates_present_fields() {
        let req = UpdateMyProfileRequest {
            nom:    Some(String::new()),
            prenom: None,
            email:  Some("nope".to_string()),
        };
        assert!(req.validate().is_err());
    }
}
