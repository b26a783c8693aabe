//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod cart_service;
mod item_service;
mod order_service;
mod user_service;

pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use item_service::ItemService;
pub use order_service::OrderService;
pub use user_service::UserService;

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::repositories::Repositories;
use crate::utils::jwt::{Identity, TokenAuthenticator};

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub auth: AuthService,
    pub items: ItemService,
    pub carts: CartService,
    pub orders: OrderService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, authenticator: Arc<TokenAuthenticator>) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            auth: AuthService::new(repos.users.clone(), authenticator),
            items: ItemService::new(repos.items.clone()),
            carts: CartService::new(repos.users.clone(), repos.items, repos.carts),
            orders: OrderService::new(repos.users, repos.orders),
        }
    }
}

/// Rejects access to another user's cart or orders.
pub(crate) fn ensure_owner(identity: &Identity, username: &str) -> AppResult<()> {
    if identity.username != username {
        return Err(AppError::Forbidden {
            message: format!("Not allowed to act on behalf of '{}'", username),
        });
    }
    Ok(())
}
