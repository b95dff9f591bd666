//! Response helpers shared by API handlers.
//!
//! Maps service-layer errors onto HTTP status codes. Infrastructure failures
//! are reduced to fixed messages; anything more specific belongs in the logs.

use crate::errors::ServiceError;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for informational endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Response timestamp
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Convert ServiceError to an HTTP status and message
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::AuthenticationFailed => {
            (StatusCode::UNAUTHORIZED, ServiceError::AuthenticationFailed.to_string())
        }
        ServiceError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
        ServiceError::Expired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
        ServiceError::StoreUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable".to_string(),
        ),
        ServiceError::SigningUnavailable { .. } | ServiceError::InternalError { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    }
}
