//! Middleware for protecting authenticated routes.
//!
//! Validates bearer tokens with the process-wide `TokenIssuer` and makes the
//! decoded claims available to handlers.

use crate::api::common::service_error_to_http;
use crate::auth::service::AuthService;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// JWT authentication middleware
///
/// Accepts `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
pub async fn jwt_auth(mut request: Request, next: Next) -> Response {
    let token = match request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
    {
        Some((_, token)) => token.trim().to_string(),
        None => return StatusCode::UNAUTHORIZED.into_response(),
    };

    let Some(auth_service) = request.extensions().get::<Arc<AuthService>>().cloned() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    match auth_service.issuer().verify(&token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(error) => service_error_to_http(error).into_response(),
    }
}
