//! Database repository for user credential lookups.
//!
//! The service only ever reads from the `users` table; registration is owned
//! by another writer to the same store.

use crate::database::models::User;
use crate::errors::StoreError;
use async_trait::async_trait;
use sqlx::AnyPool;
use std::time::Duration;

/// Read access to user credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the single record whose username matches exactly.
    ///
    /// # Errors
    /// `StoreError::NotFound` when nothing matches, `Timeout` or `Unavailable`
    /// when the store cannot answer.
    async fn find_by_username(&self, username: &str) -> Result<User, StoreError>;
}

/// Repository for user database operations.
pub struct UserRepository {
    /// Shared connection pool
    pool: AnyPool,
    query_timeout: Duration,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Connection pool to the credential store
    /// * `query_timeout` - Upper bound on a single lookup, connection acquisition included
    pub fn new(pool: AnyPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        let query = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool);

        let user = tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout)??;

        user.ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::{insert_user, memory_pool, unreachable_pool};

    #[tokio::test]
    async fn test_find_by_username_returns_matching_record() {
        let pool = memory_pool().await;
        insert_user(&pool, 1, "alice", "hash-a").await;
        insert_user(&pool, 2, "bob", "hash-b").await;

        let repo = UserRepository::new(pool, Duration::from_secs(5));
        let user = repo.find_by_username("bob").await.unwrap();

        assert_eq!(user.id, 2);
        assert_eq!(user.username, "bob");
        assert_eq!(user.password_hash, "hash-b");
    }

    #[tokio::test]
    async fn test_find_by_username_missing() {
        let pool = memory_pool().await;
        insert_user(&pool, 1, "alice", "hash-a").await;

        let repo = UserRepository::new(pool, Duration::from_secs(5));

        assert!(matches!(
            repo.find_by_username("alicia").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            repo.find_by_username("ALICE").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let pool = memory_pool().await;
        insert_user(&pool, 1, "alice", "hash-a").await;

        let duplicate = sqlx::query("INSERT INTO users (id, username, password_hash) VALUES (?, ?, ?)")
            .bind(2_i64)
            .bind("alice")
            .bind("hash-other")
            .execute(&pool)
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let pool = memory_pool().await;
        insert_user(&pool, 1, "alice", "hash-a").await;

        let repo = UserRepository::new(pool, Duration::ZERO);

        assert!(matches!(
            repo.find_by_username("alice").await,
            Err(StoreError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        let repo = UserRepository::new(unreachable_pool(), Duration::from_secs(5));

        let err = repo.find_by_username("alice").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unavailable(_) | StoreError::Timeout
        ));
    }
}
