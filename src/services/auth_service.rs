//! Login and token verification.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::jwt::{AuthFailure, Identity, IssuedToken, TokenAuthenticator};
use crate::utils::password::verify_password_blocking;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    authenticator: Arc<TokenAuthenticator>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, authenticator: Arc<TokenAuthenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    /// Checks the credential and issues a token for the user.
    ///
    /// Unknown users and wrong passwords yield the same `Unauthorized` error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(User, IssuedToken)> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::warn!(username = %username, "Login for unknown user");
            return Err(invalid_credentials());
        };

        if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!(username = %username, "Login with wrong password");
            return Err(invalid_credentials());
        }

        let issued = self.authenticator.issue(&Identity {
            user_id: user.id,
            username: user.username.clone(),
        })?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, issued))
    }

    /// Verifies a presented bearer token.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthFailure> {
        self.authenticator.verify(token)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized {
        message: INVALID_CREDENTIALS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{register, services};

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let services = services();
        let user = register(&services, "alice").await;

        let (logged_in, issued) = services.auth.login("alice", "password123").await.unwrap();

        assert_eq!(logged_in.id, user.id);
        let identity = services.auth.authenticate(&issued.token).unwrap();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let services = services();
        register(&services, "alice").await;

        let wrong = services.auth.login("alice", "wrong-password").await.unwrap_err();
        let unknown = services.auth.login("ghost", "password123").await.unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_authenticate_rejects_garbage() {
        let services = services();

        assert_eq!(
            services.auth.authenticate("garbage"),
            Err(AuthFailure::Malformed)
        );
    }
}
