//! Turning carts into orders and reading order history.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewOrder, Order};
use crate::repositories::{OrderRepository, UserRepository};
use crate::services::ensure_owner;
use crate::utils::jwt::Identity;

#[derive(Clone)]
pub struct OrderService {
    users: Arc<dyn UserRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(users: Arc<dyn UserRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { users, orders }
    }

    /// Snapshots the user's cart into a new order and empties the cart.
    ///
    /// An empty cart still produces an order, with no entries and a zero total.
    pub async fn submit(&self, identity: &Identity, username: &str) -> AppResult<Order> {
        ensure_owner(identity, username)?;

        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::user_not_found("username", username))?;

        let new_order = NewOrder::from_cart(&mut user.cart);
        let order = self.orders.checkout(new_order, &user.cart).await?;

        tracing::info!(
            user_id = user.id,
            order_id = order.id,
            entries = order.items.len(),
            total = %order.total,
            "Order submitted"
        );
        Ok(order)
    }

    /// All orders of the user in submission order.
    pub async fn history(&self, identity: &Identity, username: &str) -> AppResult<Vec<Order>> {
        ensure_owner(identity, username)?;

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::user_not_found("username", username))?;

        self.orders.find_by_user(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartOperation;
    use crate::services::test_support::{identity_of, register, seed_item, services};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_full_checkout_walkthrough() {
        let services = services();
        let user = register(&services, "alice").await;
        let me = identity_of(&user);
        let round = seed_item(&services, "Round Widget", "2.99").await;
        let square = seed_item(&services, "Square Widget", "3.00").await;

        let carts = &services.carts;
        carts.mutate_cart(&me, "alice", round.id, 1, CartOperation::Add).await.unwrap();
        carts.mutate_cart(&me, "alice", square.id, 2, CartOperation::Add).await.unwrap();
        carts.mutate_cart(&me, "alice", round.id, 1, CartOperation::Remove).await.unwrap();

        let order = services.orders.submit(&me, "alice").await.unwrap();

        assert_eq!(order.total, BigDecimal::from_str("6.00").unwrap());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.user_id, user.id);
        let stored = services.users.get_user(user.id).await.unwrap();
        assert!(stored.cart.is_empty());
        assert_eq!(stored.cart.total, BigDecimal::default());
    }

    #[tokio::test]
    async fn test_submit_empty_cart_gives_empty_order() {
        let services = services();
        let user = register(&services, "alice").await;

        let order = services.orders.submit(&identity_of(&user), "alice").await.unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.total, BigDecimal::default());
    }

    #[tokio::test]
    async fn test_history_keeps_submission_order() {
        let services = services();
        let user = register(&services, "alice").await;
        let me = identity_of(&user);
        let round = seed_item(&services, "Round Widget", "2.99").await;

        assert!(services.orders.history(&me, "alice").await.unwrap().is_empty());

        services.carts.mutate_cart(&me, "alice", round.id, 1, CartOperation::Add).await.unwrap();
        let first = services.orders.submit(&me, "alice").await.unwrap();
        let second = services.orders.submit(&me, "alice").await.unwrap();

        let history = services.orders.history(&me, "alice").await.unwrap();
        assert_eq!(history, vec![first, second]);
    }

    #[tokio::test]
    async fn test_foreign_history_is_forbidden() {
        let services = services();
        let alice = register(&services, "alice").await;
        register(&services, "bob").await;

        let submit = services.orders.submit(&identity_of(&alice), "bob").await;
        let history = services.orders.history(&identity_of(&alice), "bob").await;

        assert!(matches!(submit, Err(AppError::Forbidden { .. })));
        assert!(matches!(history, Err(AppError::Forbidden { .. })));
    }
}
