//! Password hashing and verification (Argon2id).
//!
//! The repository treats these two functions as an opaque one-way primitive:
//! [`hash_password`] produces a PHC-format string stored in the authn
//! collection and [`verify_password`] checks a candidate against it.
//! Argon2 is deliberately slow, so both run on the blocking thread pool.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Hash a password using Argon2id with a fresh random salt
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password)).await?
}

/// Verify a password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on mismatch; a malformed hash is an error.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &hash)).await?
}

fn hash_password_blocking(password: &str) -> Result<String> {
    // 16 random bytes from a v4 UUID make a standard-length salt
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AppError::PasswordHash(format!("Failed to encode salt: {}", e)))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::PasswordHash(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
