use bigdecimal::BigDecimal;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{Cart, Item};

/// Immutable snapshot of a cart taken at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<Item>,
    pub total: BigDecimal,
    pub created_at: Timestamp,
}

/// NewOrder model for inserting new records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i64,
    pub items: Vec<Item>,
    pub total: BigDecimal,
}

impl NewOrder {
    /// Moves the cart contents into a new order and leaves the cart empty with
    /// a zero total.
    ///
    /// The caller must persist the order and the emptied cart together.
    pub fn from_cart(cart: &mut Cart) -> Self {
        Self {
            user_id: cart.user_id,
            items: std::mem::take(&mut cart.items),
            total: std::mem::take(&mut cart.total),
        }
    }

    pub fn into_order(self, id: i64, created_at: Timestamp) -> Order {
        Order {
            id,
            user_id: self.user_id,
            items: self.items,
            total: self.total,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(id: i64, price: &str) -> Item {
        Item {
            id,
            name: format!("item{}", id),
            price: BigDecimal::from_str(price).unwrap(),
            description: String::new(),
        }
    }

    #[test]
    fn test_from_cart_moves_entries_and_resets_cart() {
        let mut cart = Cart::new(3, 9);
        cart.add_item(&item(1, "2.99"), 1).unwrap();
        cart.add_item(&item(2, "3.00"), 2).unwrap();
        cart.remove_item(&item(1, "2.99"), 1);

        let order = NewOrder::from_cart(&mut cart);

        assert_eq!(order.user_id, 9);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, BigDecimal::from_str("6.00").unwrap());
        assert!(cart.is_empty());
        assert_eq!(cart.total, BigDecimal::default());
        assert_eq!(cart.id, 3);
    }

    #[test]
    fn test_from_empty_cart_yields_empty_order() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "1.00"), 1).unwrap();
        let _ = NewOrder::from_cart(&mut cart);

        let second = NewOrder::from_cart(&mut cart);
        assert!(second.items.is_empty());
        assert_eq!(second.total, BigDecimal::default());
    }

    #[test]
    fn test_order_is_independent_of_later_cart_changes() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "1.50"), 2).unwrap();

        let order = NewOrder::from_cart(&mut cart).into_order(5, Timestamp::UNIX_EPOCH);
        cart.add_item(&item(2, "9.00"), 1).unwrap();

        assert_eq!(order.id, 5);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, BigDecimal::from_str("3.00").unwrap());
    }
}
