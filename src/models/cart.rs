//! Shopping cart and the rules for mutating it.
//!
//! A cart holds one entry per unit: adding an item three times stores three
//! copies. The total is never adjusted incrementally; it is re-derived from the
//! entries after each mutation with exact decimal arithmetic.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Item;

/// Upper bound on the number of entries a single cart may hold.
pub const MAX_CART_ENTRIES: usize = 10_000;

/// Direction of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartOperation {
    Add,
    Remove,
}

/// Errors raised by the cart itself (lookup failures are reported elsewhere).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Quantity must be a positive integer, got {quantity}")]
    InvalidQuantity { quantity: i32 },
    #[error("Cart cannot hold more than {limit} entries, requested {requested}")]
    TooManyEntries { limit: usize, requested: usize },
}

/// A user's cart. `user_id` is the back-reference to the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<Item>,
    pub total: BigDecimal,
}

impl Cart {
    /// Creates an empty cart with a zero total.
    pub fn new(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            items: Vec::new(),
            total: BigDecimal::default(),
        }
    }

    /// Appends `quantity` entries of `item` to the end of the cart.
    ///
    /// # Errors
    /// - `InvalidQuantity` when `quantity <= 0`
    /// - `TooManyEntries` when the cart would exceed [`MAX_CART_ENTRIES`]
    ///
    /// On error the cart is left untouched.
    pub fn add_item(&mut self, item: &Item, quantity: i32) -> Result<(), CartError> {
        let count = match usize::try_from(quantity) {
            Ok(count) if count > 0 => count,
            _ => return Err(CartError::InvalidQuantity { quantity }),
        };

        let requested = self.items.len().saturating_add(count);
        if requested > MAX_CART_ENTRIES {
            return Err(CartError::TooManyEntries {
                limit: MAX_CART_ENTRIES,
                requested,
            });
        }

        self.items.extend(std::iter::repeat_n(item, count).cloned());
        self.recompute_total();
        Ok(())
    }

    /// Removes up to `quantity` entries matching `item` by id, earliest first.
    ///
    /// Removal saturates: asking for more than the cart holds removes every
    /// matching entry, and an absent item or a non-positive quantity removes
    /// nothing. Returns the number of entries removed.
    pub fn remove_item(&mut self, item: &Item, quantity: i32) -> usize {
        let mut remaining = usize::try_from(quantity).unwrap_or(0);
        let before = self.items.len();

        self.items.retain(|entry| {
            if remaining > 0 && entry.id == item.id {
                remaining -= 1;
                false
            } else {
                true
            }
        });

        self.recompute_total();
        before - self.items.len()
    }

    /// Applies an add or remove in one call.
    pub fn mutate(
        &mut self,
        operation: CartOperation,
        item: &Item,
        quantity: i32,
    ) -> Result<(), CartError> {
        match operation {
            CartOperation::Add => self.add_item(item, quantity),
            CartOperation::Remove => {
                self.remove_item(item, quantity);
                Ok(())
            }
        }
    }

    /// Number of entries for the given item id.
    pub fn count_of(&self, item_id: i64) -> usize {
        self.items.iter().filter(|entry| entry.id == item_id).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute_total(&mut self) {
        self.total = sum_prices(&self.items);
    }
}

/// Exact sum of the catalog price of every entry.
pub fn sum_prices(items: &[Item]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::default(), |acc, entry| acc + &entry.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn item(id: i64, price: &str) -> Item {
        Item {
            id,
            name: format!("item{}", id),
            price: dec(price),
            description: format!("precious item{}", id),
        }
    }

    fn cents(value: i64) -> BigDecimal {
        dec(&format!("{}.{:02}", value / 100, value % 100))
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new(1, 7);
        assert!(cart.is_empty());
        assert_eq!(cart.user_id, 7);
        assert_eq!(cart.total, dec("0"));
    }

    #[test]
    fn test_add_item_appends_one_entry_per_unit() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "2.99"), 1).unwrap();
        cart.add_item(&item(2, "3.00"), 2).unwrap();

        let ids: Vec<i64> = cart.items.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![1, 2, 2]);
        assert_eq!(cart.total, dec("8.99"));
    }

    #[test]
    fn test_add_non_positive_quantity_is_rejected() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "2.99"), 1).unwrap();
        let before = cart.clone();

        for quantity in [0, -1, i32::MIN] {
            let result = cart.add_item(&item(2, "5.00"), quantity);
            assert_eq!(result, Err(CartError::InvalidQuantity { quantity }));
            assert_eq!(cart, before);
        }
    }

    #[test]
    fn test_add_beyond_entry_limit_is_rejected() {
        let mut cart = Cart::new(1, 1);
        let widget = item(1, "2.99");
        cart.add_item(&widget, 2).unwrap();
        let before = cart.clone();

        let result = cart.add_item(&widget, i32::MAX);
        assert_eq!(
            result,
            Err(CartError::TooManyEntries {
                limit: MAX_CART_ENTRIES,
                requested: 2 + i32::MAX as usize,
            })
        );
        assert_eq!(cart, before);

        let room = (MAX_CART_ENTRIES - 2) as i32;
        assert!(cart.add_item(&widget, room + 1).is_err());
        cart.add_item(&widget, room).unwrap();
        assert_eq!(cart.items.len(), MAX_CART_ENTRIES);
        assert!(cart.add_item(&widget, 1).is_err());
    }

    #[test]
    fn test_remove_more_than_present_saturates() {
        let mut cart = Cart::new(1, 1);
        let widget = item(1, "1.99");
        cart.add_item(&widget, 2).unwrap();
        cart.add_item(&item(2, "4.00"), 1).unwrap();

        let removed = cart.remove_item(&widget, 5);

        assert_eq!(removed, 2);
        assert_eq!(cart.count_of(1), 0);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, dec("4.00"));
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "1.99"), 1).unwrap();
        let before = cart.clone();

        assert_eq!(cart.remove_item(&item(9, "9.99"), 3), 0);
        assert_eq!(cart.remove_item(&item(1, "1.99"), 0), 0);
        assert_eq!(cart.remove_item(&item(1, "1.99"), -4), 0);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_takes_earliest_entries_and_keeps_order() {
        let mut cart = Cart::new(1, 1);
        let a = item(1, "1.00");
        let b = item(2, "2.00");
        cart.add_item(&a, 1).unwrap();
        cart.add_item(&b, 1).unwrap();
        cart.add_item(&a, 1).unwrap();
        cart.add_item(&b, 1).unwrap();

        cart.remove_item(&a, 1);

        let ids: Vec<i64> = cart.items.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![2, 1, 2]);
        assert_eq!(cart.total, dec("5.00"));
    }

    #[test]
    fn test_mutate_dispatches_by_operation() {
        let mut cart = Cart::new(1, 1);
        let widget = item(1, "2.50");

        cart.mutate(CartOperation::Add, &widget, 3).unwrap();
        assert_eq!(cart.total, dec("7.50"));

        cart.mutate(CartOperation::Remove, &widget, 1).unwrap();
        assert_eq!(cart.total, dec("5.00"));

        assert!(cart.mutate(CartOperation::Add, &widget, 0).is_err());
        assert!(cart.mutate(CartOperation::Remove, &widget, 0).is_ok());
    }

    #[test]
    fn test_walkthrough_totals() {
        let mut cart = Cart::new(1, 1);
        let round = item(1, "2.99");
        let square = item(2, "3.00");

        cart.add_item(&round, 1).unwrap();
        assert_eq!(cart.total, dec("2.99"));

        cart.add_item(&square, 2).unwrap();
        assert_eq!(cart.total, dec("8.99"));

        cart.remove_item(&round, 1);
        assert_eq!(cart.total, dec("6.00"));
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_decimal_sum_has_no_float_drift() {
        let mut cart = Cart::new(1, 1);
        cart.add_item(&item(1, "0.10"), 3).unwrap();
        assert_eq!(cart.total, dec("0.30"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_total_matches_entries_after_every_mutation(
            ops in prop::collection::vec((any::<bool>(), 0i64..5, -2i32..6), 1..40),
            prices in prop::collection::vec(0i64..100_000, 5),
        ) {
            let catalog: Vec<Item> = prices
                .iter()
                .enumerate()
                .map(|(id, price)| Item {
                    id: id as i64,
                    name: format!("item{}", id),
                    price: cents(*price),
                    description: String::new(),
                })
                .collect();
            let mut cart = Cart::new(1, 1);

            for (add, index, quantity) in ops {
                let entry = &catalog[index as usize];
                if add {
                    let _ = cart.add_item(entry, quantity);
                } else {
                    cart.remove_item(entry, quantity);
                }

                let expected: i64 = cart
                    .items
                    .iter()
                    .map(|e| prices[e.id as usize])
                    .sum();
                prop_assert_eq!(&cart.total, &cents(expected));
            }
        }

        #[test]
        fn prop_remove_then_readd_restores_total(
            price in 0i64..100_000,
            present in 1i32..6,
            quantity in 1i32..6,
        ) {
            let widget = Item {
                id: 1,
                name: "widget".to_string(),
                price: cents(price),
                description: String::new(),
            };
            let mut cart = Cart::new(1, 1);
            cart.add_item(&widget, present).unwrap();
            let before = cart.total.clone();

            let removed = cart.remove_item(&widget, quantity);
            prop_assert_eq!(removed, quantity.min(present) as usize);
            cart.add_item(&widget, removed as i32).unwrap();

            prop_assert_eq!(cart.total, before);
        }
    }
}
