//! Liveness and readiness handlers.

use crate::api::common::ApiResponse;
use crate::database::Database;
use axum::{extract::Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};
use tracing::warn;

/// Service banner
pub async fn root_handler() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        json!({
            "service": "userservice",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "User service is running",
    ))
}

/// Reports whether the credential store answers queries
pub async fn health(
    Extension(db): Extension<Database>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    match db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({ "database": "up" }), "healthy")),
        ),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::failure("database unavailable")),
            )
        }
    }
}
