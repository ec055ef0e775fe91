//! # API Error Responses
//!
//! JSON body rendering for [`AppError`] so handlers can return
//! `Result<Json<T>>` directly from axum routes.
//!
//! ## Response Format
//!
//! ```json
//! {
//!   "success": false,
//!   "code": "NOT_FOUND",
//!   "message": "Ticket not found"
//! }
//! ```

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Serialized error body returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false` for errors.
    pub success: bool,
    /// Stable machine-readable error code.
    pub code:    String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorBody {
    /// Build the body for an application error.
    #[must_use]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            success: false,
            code:    err.code().to_string(),
            message: err.message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody::from_error(&self);

        if status.is_server_error() {
            tracing::error!(code = %body.code, message = %body.message, "Request failed");
        }

        let mut response = (status, Json(body)).into_response();
        if status == http::StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, "Bearer".parse().expect("static header value"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_fields() {
        let err = AppError::not_found("Client not found");
        let body = ErrorBody::from_error(&err);

        assert!(!body.success);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Client not found");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::conflict("Client has demandeurs").into_response();
        assert_eq!(response.status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::unauthorized("Missing authorization header").into_response();
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }

    #[test]
    fn test_error_body_serializes() {
        let body = ErrorBody::from_error(&AppError::validation("etat is not a valid status"));
        let json = serde_json::to_string(&body).unwrap();

        assert!(json.contains("\"success\":false"));
        assert!(json.contains("VALIDATION_ERROR"));
    }
}
