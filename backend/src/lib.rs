//! User identity service.
//!
//! Verifies username/password pairs against a relational credential store and
//! issues signed session tokens. The binary in `main.rs` composes these
//! pieces; everything here is constructed explicitly and injected.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod utils;

use crate::auth::service::AuthService;
use crate::database::Database;
use axum::{Extension, Router};
use std::sync::Arc;

/// Assemble every route with its shared dependencies.
pub fn build_router(auth_service: Arc<AuthService>, db: Database) -> Router {
    Router::new()
        .merge(api::health::routes::health_router())
        .nest("/auth", auth::routes::auth_router())
        .layer(Extension(auth_service))
        .layer(Extension(db))
}
