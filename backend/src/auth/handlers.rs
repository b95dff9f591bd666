//! Handler functions for authentication-related API endpoints.
//!
//! These functions translate HTTP requests into calls on `auth::service` and
//! map service errors back onto HTTP responses.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use std::sync::Arc;

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<SessionResult>, (StatusCode, String)> {
    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get the identity carried by the caller's token
#[axum::debug_handler]
pub async fn me(Extension(claims): Extension<Claims>) -> ResponseJson<TokenInfo> {
    ResponseJson(TokenInfo::from(&claims))
}
