//! # Demandeur Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::clients::{ClientRef, ClientResponse};

/// Response for a demandeur with the owning client's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandeurResponse {
    pub id:        Uuid,
    pub nom:       String,
    pub prenom:    String,
    pub telephone: String,
    pub email:     String,
    pub fonction:  String,
    pub client:    ClientRef,
}

impl DemandeurResponse {
    /// Build the response from a demandeur and its owning client.
    #[must_use]
    pub fn from_models(demandeur: &entity::demandeurs::Model, client: &entity::clients::Model) -> Self {
        Self {
            id:        demandeur.id,
            nom:       demandeur.nom.clone(),
            prenom:    demandeur.prenom.clone(),
            telephone: demandeur.telephone.clone(),
            email:     demandeur.email.clone(),
            fonction:  demandeur.fonction.clone(),
            client:    ClientRef::from_model(client),
        }
    }
}

/// Detail response joining the full owning client record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandeurDetailResponse {
    pub id:        Uuid,
    pub nom:       String,
    pub prenom:    String,
    pub telephone: String,
    pub email:     String,
    pub fonction:  String,
    pub client:    ClientResponse,
}

impl DemandeurDetailResponse {
    #[must_use]
    pub fn from_models(demandeur: &entity::demandeurs::Model, client: &entity::clients::Model) -> Self {
        Self {
            id:        demandeur.id,
            nom:       demandeur.nom.clone(),
            prenom:    demandeur.prenom.clone(),
            telephone: demandeur.telephone.clone(),
            email:     demandeur.email.clone(),
            fonction:  demandeur.fonction.clone(),
            client:    ClientResponse::from_model(client),
        }
    }
}

/// Request to create a new demandeur under an existing client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDemandeurRequest {
    #[validate(length(min = 1, max = 255, message = "nom is required"))]
    pub nom:       String,
    #[validate(length(min = 1, max = 255, message = "prenom is required"))]
    pub prenom:    String,
    #[validate(length(min = 1, max = 64, message = "telephone is required"))]
    pub telephone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email:     String,
    #[validate(length(min = 1, max = 255, message = "fonction is required"))]
    pub fonction:  String,
    pub client_id: Uuid,
}

/// Request to update a demandeur; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDemandeurRequest {
    #[validate(length(min = 1, max = 255, message = "nom must not be empty"))]
    pub nom:       Option<String>,
    #[validate(length(min = 1, max = 255, message = "prenom must not be empty"))]
    pub prenom:    Option<String>,
    #[validate(length(min = 1, max = 64, message = "telephone must not be empty"))]
    pub telephone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:     Option<String>,
    #[validate(length(min = 1, max = 255, message = "fonction must not be empty"))]
    pub fonction:  Option<String>,
    /// Move the demandeur to another client
    pub client_id: Option<Uuid>,
}
