//! User service for registration and lookups.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::password::hash_password_blocking;

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Registers a user with an empty cart.
    ///
    /// The password is hashed here; request-level rules (length, confirmation)
    /// are checked by the caller.
    ///
    /// # Returns
    /// The created user, or `Duplicate` if the username is taken
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        let password_hash = hash_password_blocking(password.to_string()).await?;
        let user = self
            .repo
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Gets a user by their ID.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found("id", id))
    }

    /// Gets a user by their username.
    ///
    /// # Returns
    /// The user if found, or `NotFound` error
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::user_not_found("username", username))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::services::test_support::services;
    use crate::utils::password::verify_password;

    #[tokio::test]
    async fn test_register_hashes_password() {
        let services = services();

        let user = services.users.register("alice", "password123").await.unwrap();

        assert_ne!(user.password_hash, "password123");
        assert!(verify_password("password123", &user.password_hash).unwrap());
        assert!(user.cart.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let services = services();
        services.users.register("alice", "password123").await.unwrap();

        let result = services.users.register("alice", "other-password").await;

        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_lookups() {
        let services = services();
        let user = services.users.register("alice", "password123").await.unwrap();

        assert_eq!(services.users.get_user(user.id).await.unwrap().username, "alice");
        assert_eq!(
            services.users.get_user_by_username("alice").await.unwrap().id,
            user.id
        );
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let services = services();

        let by_id = services.users.get_user(404).await.unwrap_err();
        let by_name = services.users.get_user_by_username("ghost").await.unwrap_err();

        assert_eq!(by_id.to_string(), "Resource not found: user with id=404");
        assert_eq!(
            by_name.to_string(),
            "Resource not found: user with username=ghost"
        );
    }
}
