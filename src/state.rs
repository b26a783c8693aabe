//! Application state for Axum web framework.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::jwt::TokenAuthenticator;

/// Application state containing all shared services.
///
/// Cloning is cheap since services hold their repositories behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Builds state over a fresh in-process store.
    pub fn new(jwt_config: &JwtConfig) -> Self {
        Self::with_repositories(Repositories::in_memory(), jwt_config)
    }

    /// Builds state over the given repositories. The signing key is fixed
    /// from here on.
    pub fn with_repositories(repos: Repositories, jwt_config: &JwtConfig) -> Self {
        let authenticator = TokenAuthenticator::new(&jwt_config.secret, jwt_config.horizon());
        Self {
            services: Services::new(repos, Arc::new(authenticator)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::AppState;
    use crate::config::JwtConfig;
    use crate::services::test_support::SECRET;

    pub fn test_state() -> AppState {
        AppState::new(&JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 240,
        })
    }
}
