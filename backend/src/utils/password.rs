//! bcrypt password hashing.
//!
//! Hashing and verification are CPU bound, so both run on the blocking pool
//! to keep request tasks responsive.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};
use tracing::error;

/// Hash a plaintext password with the given bcrypt cost.
pub async fn hash_password(password: String, cost: u32) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ServiceError::internal_error(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ServiceError::internal_error("password hashing failed")
        })
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// # Returns
/// `true` if the password matches the hash, `false` otherwise
///
/// # Errors
/// `InternalError` if the stored hash is malformed
pub async fn verify_password(password: String, password_hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| ServiceError::internal_error(format!("verification task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Stored password hash could not be parsed");
            ServiceError::internal_error("password verification failed")
        })
}
