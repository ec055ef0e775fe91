//! # Data Transfer Objects Module
//!
//! Request and response types for API endpoints.

pub mod auth;
pub mod clients;
pub mod demandeurs;
pub mod stats;
pub mod tickets;
pub mod users;

use serde::{Deserialize, Serialize};

/// Generic success response for operations without a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl SuccessResponse {
    /// Build a success response with the given message.
    #[must_use]
    pub fn new(message: impl ToString) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
