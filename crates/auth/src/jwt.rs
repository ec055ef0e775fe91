//! JWT bearer token issuance and validation.
//!
//! Tokens bind a user id and role for 24 hours by default; the secret is a
//! base64-encoded HS256 key taken from `GUICHET_JWT_SECRET`.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use error::{AppError, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Base64-encoded HS256 secret
    pub secret:             String,
    /// Token lifetime in seconds
    pub expiration_seconds: u64,
    /// Expected `iss` claim
    pub issuer:             String,
    /// Expected `aud` claim
    pub audience:           String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret:             std::env::var("GUICHET_JWT_SECRET").unwrap_or_default(),
            expiration_seconds: std::env::var("GUICHET_JWT_EXPIRATION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 60 * 60),
            issuer:             std::env::var("GUICHET_JWT_ISSUER").unwrap_or_else(|_| "guichet".to_string()),
            audience:           std::env::var("GUICHET_JWT_AUDIENCE").unwrap_or_else(|_| "guichet-api".to_string()),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    pub email: String,

    /// User role (wire form: admin / assistant / collaborator)
    pub role: String,

    /// Token issuer
    pub iss: String,

    /// Token audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: u64,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Unique token ID
    pub jti: String,
}

/// Creates a new JWT access token for a user.
///
/// # Errors
///
/// Returns an error if the secret is invalid or encoding fails.
pub fn create_access_token(config: &JwtConfig, user_id: &str, email: &str, role: &str) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| AppError::internal(format!("Failed to get current time: {}", e)))?;

    let issued_at = now.as_secs();
    let expiration = now + Duration::from_secs(config.expiration_seconds);

    let claims = Claims {
        sub:   user_id.to_string(),
        email: email.to_string(),
        role:  role.to_string(),
        iss:   config.issuer.clone(),
        aud:   config.audience.clone(),
        exp:   expiration.as_secs(),
        iat:   issued_at,
        jti:   uuid::Uuid::new_v4().to_string(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_base64_secret(&config.secret)
            .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?,
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))?;

    Ok(token)
}

/// Validates a JWT token and returns the claims.
///
/// # Errors
///
/// Returns `Unauthorized` on expired, malformed or mis-issued tokens.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims> {
    let decoding_key = DecodingKey::from_base64_secret(&config.secret)
        .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::default();
    validation.iss = Some(HashSet::from([config.issuer.clone()]));
    validation.aud = Some(HashSet::from([config.audience.clone()]));
    validation.validate_exp = true;

    let data = jsonwebtoken::decode(token, &decoding_key, &validation)
        .map_err(|e| AppError::unauthorized(format!("Token validation failed: {}", e)))?;

    Ok(data.claims)
}

/// Extracts the Bearer token from an Authorization header value.
///
/// Returns `None` when the header is not a non-empty Bearer credential.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
