//! In-process store on top of `dashmap`.
//!
//! A user's cart and order history share one map entry, so a checkout holds a
//! single shard lock while it writes both.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use jiff::Timestamp;

use super::{CartRepository, ItemRepository, OrderRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{Cart, Item, NewItem, NewOrder, NewUser, Order, User};

struct UserRecord {
    user: User,
    orders: Vec<Order>,
}

pub struct MemoryStore {
    users: DashMap<i64, UserRecord>,
    usernames: DashMap<String, i64>,
    items: DashMap<i64, Item>,
    next_user_id: AtomicI64,
    next_cart_id: AtomicI64,
    next_item_id: AtomicI64,
    next_order_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            items: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_cart_id: AtomicI64::new(1),
            next_item_id: AtomicI64::new(1),
            next_order_id: AtomicI64::new(1),
        }
    }

    fn user_by_id(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|record| record.user.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        match self.usernames.entry(new_user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "username".to_string(),
                value: new_user.username,
            }),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::Relaxed);
                let cart_id = self.next_cart_id.fetch_add(1, Ordering::Relaxed);
                let user = User {
                    id,
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    cart: Cart::new(cart_id, id),
                };

                self.users.insert(
                    id,
                    UserRecord {
                        user: user.clone(),
                        orders: Vec::new(),
                    },
                );
                slot.insert(id);
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.user_by_id(id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry) else {
            return Ok(None);
        };
        Ok(self.user_by_id(id))
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn create(&self, new_item: NewItem) -> AppResult<Item> {
        let id = self.next_item_id.fetch_add(1, Ordering::Relaxed);
        let item = Item {
            id,
            name: new_item.name,
            price: new_item.price,
            description: new_item.description,
        };
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        Ok(self.items.get(&id).map(|item| item.clone()))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Item>> {
        let mut found: Vec<Item> = self
            .items
            .iter()
            .filter(|item| item.name == name)
            .map(|item| item.clone())
            .collect();
        found.sort_by_key(|item| item.id);
        Ok(found)
    }

    async fn list_all(&self) -> AppResult<Vec<Item>> {
        let mut all: Vec<Item> = self.items.iter().map(|item| item.clone()).collect();
        all.sort_by_key(|item| item.id);
        Ok(all)
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn save(&self, cart: &Cart) -> AppResult<()> {
        let mut record = self
            .users
            .get_mut(&cart.user_id)
            .ok_or_else(|| AppError::user_not_found("id", cart.user_id))?;
        record.user.cart = cart.clone();
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn checkout(&self, new_order: NewOrder, cart: &Cart) -> AppResult<Order> {
        let mut record = self
            .users
            .get_mut(&new_order.user_id)
            .ok_or_else(|| AppError::user_not_found("id", new_order.user_id))?;

        let id = self.next_order_id.fetch_add(1, Ordering::Relaxed);
        let order = new_order.into_order(id, Timestamp::now());

        record.user.cart = cart.clone();
        record.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Order>> {
        Ok(self
            .users
            .get(&user_id)
            .map(|record| record.orders.clone())
            .unwrap_or_default())
    }
}
