//! # Client Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Response for a single client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientResponse {
    pub id:         Uuid,
    pub nom:        String,
    pub telephone:  String,
    pub email:      String,
    pub adresse:    String,
    /// Creation timestamp, RFC 3339
    pub created_at: String,
}

impl ClientResponse {
    /// Convert a client entity model into its response shape.
    #[must_use]
    pub fn from_model(client: &entity::clients::Model) -> Self {
        Self {
            id:         client.id,
            nom:        client.nom.clone(),
            telephone:  client.telephone.clone(),
            email:      client.email.clone(),
            adresse:    client.adresse.clone(),
            created_at: client.created_at.to_rfc3339(),
        }
    }
}

/// Minimal client reference embedded in other responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRef {
    pub id:  Uuid,
    pub nom: String,
}

impl ClientRef {
    #[must_use]
    pub fn from_model(client: &entity::clients::Model) -> Self {
        Self {
            id:  client.id,
            nom: client.nom.clone(),
        }
    }
}

/// Request to create a new client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 255, message = "nom is required"))]
    pub nom:       String,
    #[validate(length(min = 1, max = 64, message = "telephone is required"))]
    pub telephone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email:     String,
    #[validate(length(min = 1, message = "adresse is required"))]
    pub adresse:   String,
}

/// Request to update a client; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 255, message = "nom must not be empty"))]
    pub nom:       Option<String>,
    #[validate(length(min = 1, max = 64, message = "telephone must not be empty"))]
    pub telephone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:     Option<String>,
    #[validate(length(min = 1, message = "adresse must not be empty"))]
    pub adresse:   Option<String>,
}
