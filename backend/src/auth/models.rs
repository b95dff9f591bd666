//! Data structures exchanged with callers of the authentication flow.
//!
//! Internal shapes (`User`, `Claims`) never leave the service directly; they
//! are projected onto the types here first.

use crate::database::models::User;
use crate::utils::jwt::Claims;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Login request payload
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResult {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl SessionResult {
    pub fn build(user: &User, token: String) -> Self {
        SessionResult {
            id: user.id,
            username: user.username.clone(),
            token,
        }
    }
}

/// Identity carried by a verified token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: i64,
    pub username: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Claims> for TokenInfo {
    fn from(claims: &Claims) -> Self {
        TokenInfo {
            id: claims.user_id(),
            username: claims.username().to_string(),
            expires_at: claims.expires_at(),
        }
    }
}
