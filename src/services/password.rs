//! Password hashing
//!
//! Secure password hashing and verification using Argon2id with a random
//! per-password salt. Hashes are stored in PHC string format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::models::MIN_CREDENTIAL_CHARS;

/// Error types for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Raw password shorter than the minimum length
    #[error("password must be at least {} characters", MIN_CREDENTIAL_CHARS)]
    TooShort,

    /// Hashing itself failed
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// A stored hash could not be parsed
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password using Argon2id with secure defaults.
///
/// The minimum length rule is enforced here as well as at the input
/// boundary, so no caller can hash a password the policy rejects.
///
/// # Returns
///
/// The password hash as a PHC string (includes algorithm, parameters,
/// salt, and hash)
///
/// # Errors
///
/// - `TooShort` if the password has fewer than the minimum characters
/// - `Hash` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.chars().count() < MIN_CREDENTIAL_CHARS {
        return Err(PasswordError::TooShort);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash.
///
/// A mismatch is not an error: it returns `Ok(false)`. Only a stored hash
/// that cannot be parsed or verified structurally is an error.
///
/// # Errors
///
/// - `MalformedHash` if the stored hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
    }
}
