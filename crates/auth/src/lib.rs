//! # Authentication Service
//!
//! Authentication and authorization for the Guichet API:
//! - Password hashing and verification (Argon2id)
//! - JWT bearer token issuance and validation
//! - Role capability checks against required-role policies

pub mod jwt;
pub mod password;
pub mod role;

// Re-export commonly used types
pub use jwt::{create_access_token, extract_bearer_token, validate_token, Claims, JwtConfig};
pub use password::{hash_password, verify_password};
pub use role::{require_any, require_role, Role, ADMIN_ONLY, ADMIN_OR_ASSISTANT, COLLABORATEUR_ONLY};
pub use secrecy;
pub use subtle;
