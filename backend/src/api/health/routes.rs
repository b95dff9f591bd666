use crate::api::health::handlers::*;
use axum::{Router, routing::get};

pub fn health_router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health))
}
