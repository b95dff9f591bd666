//! Module for database connection setup.
//!
//! This module owns the connection pool to the credential store. The pool is
//! constructed explicitly by the composing application and passed to whoever
//! needs it; nothing here is global.

use crate::config::Config;
use crate::errors::StartupError;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::AnyPool;
use std::time::Duration;
use tracing::{info, warn};

/// Longest pause between two connection attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

pub mod models;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Opens the connection pool described by `config`.
    ///
    /// Returns the connection error instead of terminating, so the caller can
    /// decide between retrying and aborting.
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_uri)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Credential store pool initialized"
        );
        Ok(Database { pool })
    }

    /// Opens the pool, making up to `config.connect_attempts` attempts.
    ///
    /// The pause between attempts starts at `initial_delay` and doubles each
    /// time, capped at 30 seconds.
    pub async fn connect_with_retry(
        config: &Config,
        initial_delay: Duration,
    ) -> Result<Self, StartupError> {
        let mut delay = initial_delay;
        let mut attempt = 1;

        loop {
            match Self::connect(config).await {
                Ok(db) => return Ok(db),
                Err(e) if attempt < config.connect_attempts => {
                    warn!(
                        attempt,
                        error = %e,
                        "Credential store not reachable, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                    attempt += 1;
                }
                Err(source) => {
                    return Err(StartupError::StoreUnreachable {
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }

    /// Wraps an already constructed pool.
    pub fn from_pool(pool: AnyPool) -> Self {
        Database { pool }
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Round-trips a trivial query through the pool.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
