//! Role capability checks.
//!
//! Every gated operation names its required-role set explicitly and calls
//! [`require_any`] with the caller's identity; there is no ambient current
//! user and no string comparison outside [`Role`] itself.

use error::{AppError, Result};

pub use entity::sea_orm_active_enums::Role;

/// Operations restricted to administrators.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Operations open to administrators and assistants.
pub const ADMIN_OR_ASSISTANT: &[Role] = &[Role::Admin, Role::Assistant];

/// Operations restricted to collaborateurs.
pub const COLLABORATEUR_ONLY: &[Role] = &[Role::Collaborateur];

/// Require the caller to hold exactly `role`.
///
/// # Errors
///
/// `Forbidden` when the role differs.
pub fn require_role(actual: &Role, required: &Role) -> Result<()> {
    if actual == required {
        Ok(())
    }
    else {
        Err(AppError::forbidden("Access denied"))
    }
}

/// Require the caller's role to be in `allowed`.
///
/// # Errors
///
/// `Forbidden` when the role is not in the set.
pub fn require_any(actual: &Role, allowed: &[Role]) -> Result<()> {
    if allowed.contains(actual) {
        Ok(())
    }
    else {
        Err(AppError::forbidden("Access denied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_only_policy() {
        assert!(require_any(&Role::Admin, ADMIN_ONLY).is_ok());
        assert!(require_any(&Role::Assistant, ADMIN_ONLY).is_err());
        assert!(require_any(&Role::Collaborateur, ADMIN_ONLY).is_err());
    }

    #[test]
    fn test_admin_or_assistant_policy() {
        assert!(require_any(&Role::Admin, ADMIN_OR_ASSISTANT).is_ok());
        assert!(require_any(&Role::Assistant, ADMIN_OR_ASSISTANT).is_ok());
        assert!(require_any(&Role::Collaborateur, ADMIN_OR_ASSISTANT).is_err());
    }

    #[test]
    fn test_collaborateur_only_policy() {
        assert!(require_any(&Role::Collaborateur, COLLABORATEUR_ONLY).is_ok());
        assert!(require_any(&Role::Admin, COLLABORATEUR_ONLY).is_err());
    }

    #[test]
    fn test_require_role_exact() {
        assert!(require_role(&Role::Admin, &Role::Admin).is_ok());
        let err = require_role(&Role::Assistant, &Role::Admin).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_rejection_is_forbidden_not_unauthorized() {
        let err = require_any(&Role::Collaborateur, ADMIN_ONLY).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }
}
