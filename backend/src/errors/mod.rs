//! Global application error types.
//!
//! `StoreError` is what the credential store reports; `ServiceError` is the
//! taxonomy callers of the authentication pipeline see.

use thiserror::Error;

/// Errors reported by the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matches the lookup key.
    #[error("record not found")]
    NotFound,
    /// The query did not complete before the configured deadline.
    #[error("credential store query timed out")]
    Timeout,
    /// A connection could not be acquired or the query failed.
    #[error("credential store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("credential store unreachable after {attempts} attempts")]
    StoreUnreachable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

/// Errors surfaced by the authentication and token services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Bad credentials. Identical for unknown users and wrong passwords.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Credential store unavailable: {source}")]
    StoreUnavailable {
        #[source]
        source: StoreError,
    },

    #[error("Token signing unavailable: {message}")]
    SigningUnavailable { message: String },

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    Expired,

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn signing_unavailable(message: impl Into<String>) -> Self {
        Self::SigningUnavailable {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(source: StoreError) -> Self {
        Self::StoreUnavailable { source }
    }
}
