//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in the format
//! `$argon2id$v=19$m=<mem>,t=<time>,p=<lanes>$<salt_b64>$<hash_b64>` so the
//! cost parameters travel with the digest and verification can replay them.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::prelude::*;
use rand::{rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Number of iterations
    pub time_cost:   u32,
    /// Number of lanes
    pub parallelism: u32,
    /// Length of the generated hash in bytes
    pub hash_length: u32,
    /// Length of the salt in bytes
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost:   2,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

/// Hashes a password with a freshly generated random salt.
///
/// # Errors
///
/// Returns an error if the Argon2 parameters are rejected or hashing fails.
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut output = vec![0u8; config.hash_length as usize];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let encoded = format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    );

    Ok(SecretString::from(encoded))
}

/// Verifies a password against a stored hash.
///
/// Re-derives the digest with the parameters and salt embedded in
/// `expected_hash` and compares in constant time.
///
/// # Errors
///
/// `VerificationFailed` when the password does not match;
/// `InvalidHashFormat` when the stored hash cannot be parsed.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    // ["", "argon2id", "v=19", "m=..,t=..,p=..", "<salt>", "<hash>"]
    let parts: Vec<&str> = expected_hash.split('$').collect();
    if parts.len() != 6 || parts[1] != "argon2id" || parts[2] != "v=19" {
        return Err(PasswordError::InvalidHashFormat);
    }

    let (memory_cost, time_cost, parallelism) = parse_params(parts[3]).ok_or(PasswordError::InvalidHashFormat)?;

    let salt = BASE64_STANDARD.decode(parts[4])?;
    let stored_hash = BASE64_STANDARD.decode(parts[5])?;

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(memory_cost, time_cost, parallelism, Some(stored_hash.len()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut computed = vec![0u8; stored_hash.len()];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut computed)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    use subtle::ConstantTimeEq;
    if computed.as_slice().ct_eq(&stored_hash).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Parse `m=..,t=..,p=..` into (memory, time, lanes).
fn parse_params(params: &str) -> Option<(u32, u32, u32)> {
    let mut memory = None;
    let mut time = None;
    let mut lanes = None;

    for part in params.split(',') {
        let (key, value) = part.split_once('=')?;
        let value: u32 = value.parse().ok()?;
        match key {
            "m" => memory = Some(value),
            "t" => time = Some(value),
            "p" => lanes = Some(value),
            _ => return None,
        }
    }

    Some((memory?, time?, lanes?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("MotDePasse123!".to_string());
        let hash = hash_password(&password, None).unwrap();
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword".to_string());
        let wrong = SecretString::from("WrongPassword".to_string());
        let hash = hash_password(&password, None).unwrap();
        assert!(matches!(
            verify_password(&wrong, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = SecretString::from("SamePassword".to_string());
        let first = hash_password(&password, None).unwrap();
        let second = hash_password(&password, None).unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_invalid_hash_format() {
        let password = SecretString::from("whatever".to_string());
        assert!(matches!(
            verify_password(&password, "not-a-hash"),
            Err(PasswordError::InvalidHashFormat)
        ));
        assert!(matches!(
            verify_password(&password, "$bcrypt$v=19$m=1,t=1,p=1$AA$AA"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(parse_params("m=19456,t=2,p=1"), Some((19456, 2, 1)));
        assert_eq!(parse_params("m=19456,t=2"), None);
        assert_eq!(parse_params("m=19456,t=2,p=x"), None);
        assert_eq!(parse_params("m=1,t=1,p=1,z=9"), None);
    }

    #[test]
    fn test_custom_config_round_trip() {
        let password = SecretString::from("Configurable".to_string());
        let config = PasswordConfig {
            memory_cost: 8192,
            time_cost:   1,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        };
        let hash = hash_password(&password, Some(config)).unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$v=19$m=8192,t=1,p=1$"));
        assert!(verify_password(&password, hash.expose_secret()).is_ok());
    }
}
