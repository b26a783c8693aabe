//! Cart mutations on behalf of an authenticated user.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Cart, CartOperation};
use crate::repositories::{CartRepository, ItemRepository, UserRepository};
use crate::services::ensure_owner;
use crate::utils::jwt::Identity;

#[derive(Clone)]
pub struct CartService {
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
    carts: Arc<dyn CartRepository>,
}

impl CartService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemRepository>,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            users,
            items,
            carts,
        }
    }

    /// Resolves the user and item, applies the mutation and stores the cart.
    ///
    /// # Errors
    /// - `Forbidden` when `username` is not the caller
    /// - `NotFound` for an unknown user or item
    /// - `Validation` when adding a non-positive quantity
    pub async fn mutate_cart(
        &self,
        identity: &Identity,
        username: &str,
        item_id: i64,
        quantity: i32,
        operation: CartOperation,
    ) -> AppResult<Cart> {
        ensure_owner(identity, username)?;

        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::user_not_found("username", username))?;
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::item_not_found("id", item_id))?;

        user.cart.mutate(operation, &item, quantity)?;
        self.carts.save(&user.cart).await?;

        tracing::debug!(
            user_id = user.id,
            item_id,
            quantity,
            operation = ?operation,
            total = %user.cart.total,
            "Cart updated"
        );
        Ok(user.cart)
    }
}
