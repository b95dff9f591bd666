//! JWT token utilities for session issuance and verification.
//!
//! Tokens are HS256-signed with a process-wide secret loaded once at startup.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::Config;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};

/// Shortest HS256 secret accepted, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// JWT Claims structure carried by session tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    pub username: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Signs session tokens and verifies them for downstream consumers.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl TokenIssuer {
    /// Create a TokenIssuer from a raw secret and token lifetime.
    ///
    /// # Errors
    /// `SigningUnavailable` when the secret is missing or too short, or the
    /// lifetime is not positive.
    pub fn new(secret: Option<&str>, expires_in_seconds: u64) -> ServiceResult<Self> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServiceError::signing_unavailable("JWT_SECRET not set"))?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ServiceError::signing_unavailable(format!(
                "JWT_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        let expires_in = i64::try_from(expires_in_seconds)
            .ok()
            .filter(|s| *s > 0)
            .and_then(Duration::try_seconds)
            .filter(|d| Utc::now().checked_add_signed(*d).is_some())
            .ok_or_else(|| ServiceError::signing_unavailable("token lifetime out of range"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(TokenIssuer {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        })
    }

    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        Self::new(config.jwt_secret.as_deref(), config.jwt_expires_in_seconds)
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> ServiceResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token for `user` as if issued at `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> ServiceResult<String> {
        let exp = now
            .checked_add_signed(self.expires_in)
            .ok_or_else(|| ServiceError::internal_error("token expiry out of range"))?;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, user_id = user.id, "Token generation failed");
            ServiceError::internal_error("token generation failed")
        })
    }

    /// Validate and decode a token.
    ///
    /// An elapsed expiry yields `Expired`; every other failure, tampering
    /// included, yields `InvalidToken`.
    pub fn verify(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::Expired,
                _ => ServiceError::InvalidToken,
            })
    }
}
