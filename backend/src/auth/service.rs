//! Core business logic for the authentication system.
//!
//! A login runs `Received -> Verified -> TokenIssued -> Responded`, or stops at
//! the first failure. Nothing is retried here; retry policy belongs to callers.

use crate::auth::models::{LoginRequest, SessionResult};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult, StoreError};
use crate::repositories::user_repository::CredentialStore;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::{hash_password, verify_password};
use std::sync::Arc;
use tracing::{debug, error, info};
use validator::Validate;

/// Authentication service for verifying credentials and issuing session tokens
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    issuer: Arc<TokenIssuer>,
    /// Verified against when the username is unknown, so both failure paths cost the same
    dummy_hash: String,
}

impl AuthService {
    /// Create a new AuthService instance.
    ///
    /// `bcrypt_cost` should match the cost used for stored hashes.
    pub async fn new(
        store: Arc<dyn CredentialStore>,
        issuer: Arc<TokenIssuer>,
        bcrypt_cost: u32,
    ) -> ServiceResult<Self> {
        let dummy_hash = hash_password("timing-equalisation".to_string(), bcrypt_cost).await?;

        Ok(AuthService {
            store,
            issuer,
            dummy_hash,
        })
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Authenticate user and issue a session token
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<SessionResult> {
        if let Err(validation_errors) = login_request.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let LoginRequest { username, password } = login_request;
        let user = self.verify_credentials(&username, password).await?;

        let token = self.issuer.issue(&user)?;
        info!(user_id = user.id, "Session issued");

        Ok(SessionResult::build(&user, token))
    }

    /// Resolve `username` to exactly one user and check `password` against its hash.
    ///
    /// # Errors
    /// `AuthenticationFailed` for an unknown user or a wrong password, with no
    /// way to tell the two apart. `StoreUnavailable` when the lookup itself fails.
    pub async fn verify_credentials(&self, username: &str, password: String) -> ServiceResult<User> {
        let user = match self.store.find_by_username(username).await {
            Ok(user) => Some(user),
            Err(StoreError::NotFound) => None,
            Err(source) => {
                error!(error = %source, "Credential lookup failed");
                return Err(ServiceError::StoreUnavailable { source });
            }
        };

        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let matches = verify_password(password, password_hash).await?;

        match user {
            Some(user) if matches => Ok(user),
            _ => {
                debug!(username, "Authentication failed");
                Err(ServiceError::AuthenticationFailed)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::database::test_support::{insert_user, memory_pool, unreachable_pool};
    use crate::repositories::user_repository::UserRepository;
    use std::time::Duration;
    use tokio::task::JoinSet;

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let service = alice_service().await;

        let session = service.login(request("alice", "secret")).await.unwrap();

        assert_eq!(session.id, 1);
        assert_eq!(session.username, "alice");
        let claims = service.issuer().verify(&session.token).unwrap();
        assert_eq!(claims.user_id(), 1);
        assert_eq!(claims.username(), "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let service = alice_service().await;

        let wrong_password = service.login(request("alice", "wrong")).await.unwrap_err();
        let unknown_user = service.login(request("bob", "anything")).await.unwrap_err();

        assert!(matches!(wrong_password, ServiceError::AuthenticationFailed));
        assert!(matches!(unknown_user, ServiceError::AuthenticationFailed));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_every_registered_user_verifies() {
        let pool = memory_pool().await;
        let users = [(10, "carol", "c-pass"), (11, "dave", "d-pass"), (12, "erin", "e-pass")];
        for (id, username, password) in users {
            let hash = hash_password(password.to_string(), 4).await.unwrap();
            insert_user(&pool, id, username, &hash).await;
        }
        let service = service_over(pool).await;

        for (id, username, password) in users {
            let user = service
                .verify_credentials(username, password.to_string())
                .await
                .unwrap();
            assert_eq!(user.id, id);

            let err = service
                .verify_credentials(username, format!("{}x", password))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::AuthenticationFailed));
        }
    }

    #[tokio::test]
    async fn test_empty_fields_are_validation_errors() {
        let service = alice_service().await;

        let err = service.login(request("", "secret")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        let err = service.login(request("alice", "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_not_an_authentication_failure() {
        let service = service_over(unreachable_pool()).await;

        let err = service.login(request("alice", "secret")).await.unwrap_err();

        assert!(matches!(err, ServiceError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_query_timeout_is_store_unavailable() {
        let pool = memory_pool().await;
        let hash = hash_password("secret".to_string(), 4).await.unwrap();
        insert_user(&pool, 1, "alice", &hash).await;

        let store = Arc::new(UserRepository::new(pool, Duration::ZERO));
        let issuer = Arc::new(TokenIssuer::new(Some(SECRET), 900).unwrap());
        let service = AuthService::new(store, issuer, 4).await.unwrap();

        let err = service.login(request("alice", "secret")).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::StoreUnavailable {
                source: StoreError::Timeout
            }
        ));
    }

    #[tokio::test]
    async fn test_dummy_hash_uses_configured_cost() {
        let store = Arc::new(UserRepository::new(unreachable_pool(), Duration::from_secs(1)));
        let issuer = Arc::new(TokenIssuer::new(Some(SECRET), 900).unwrap());

        let service = AuthService::new(store, issuer, 5).await.unwrap();
        let stored = hash_password("secret".to_string(), 5).await.unwrap();

        // Modular crypt format: $2b$<cost>$...
        assert_eq!(&service.dummy_hash[4..7], "05$");
        assert_eq!(&service.dummy_hash[..7], &stored[..7]);
    }

    #[tokio::test]
    async fn test_concurrent_logins() {
        let service = Arc::new(alice_service().await);
        let mut tasks = JoinSet::new();

        for i in 0..8 {
            let service = Arc::clone(&service);
            tasks.spawn(async move {
                let password = if i % 2 == 0 { "secret" } else { "wrong" };
                (i, service.login(request("alice", password)).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (i, result) = joined.unwrap();
            if i % 2 == 0 {
                assert_eq!(result.unwrap().id, 1);
            } else {
                assert!(matches!(result, Err(ServiceError::AuthenticationFailed)));
            }
        }
    }
}
