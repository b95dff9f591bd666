//! Main entry point for the user service.
//!
//! Loads configuration, prepares signing keys and the credential store pool,
//! and serves the HTTP routes until shutdown.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::fmt::init;
use userservice::auth::service::AuthService;
use userservice::build_router;
use userservice::config::Config;
use userservice::database::Database;
use userservice::repositories::user_repository::UserRepository;
use userservice::utils::jwt::TokenIssuer;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;

    // Refuse to serve anything if tokens cannot be signed.
    let issuer = Arc::new(TokenIssuer::from_config(&config).context("signing key unavailable")?);

    let db = Database::connect_with_retry(&config, Duration::from_millis(500)).await?;

    let store = Arc::new(UserRepository::new(
        db.pool().clone(),
        Duration::from_secs(config.query_timeout_seconds),
    ));
    let auth_service = Arc::new(AuthService::new(store, issuer, config.bcrypt_cost).await?);

    let app = build_router(auth_service, db.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting user service on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
