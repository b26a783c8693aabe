//! Repository layer for data access operations.
//!
//! Each entity gets an async trait; handlers and services only ever see the
//! traits. The default backing is [`MemoryStore`].

mod memory;

pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Cart, Item, NewItem, NewOrder, NewUser, Order, User};

/// Persistence for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user with an empty cart.
    ///
    /// Fails with `Duplicate` when the username is taken.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Read access to the catalog, plus inserts for seeding.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, new_item: NewItem) -> AppResult<Item>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>>;

    /// Every item whose name matches exactly, ordered by id.
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Item>>;

    /// The whole catalog, ordered by id.
    async fn list_all(&self) -> AppResult<Vec<Item>>;
}

/// Persistence for carts. The owner is identified by `cart.user_id`.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Replaces the stored cart of its owner (last write wins).
    async fn save(&self, cart: &Cart) -> AppResult<()>;
}

/// Append-only order history.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores `new_order` and the emptied `cart` as one step.
    ///
    /// Either both writes are visible afterwards or neither is.
    async fn checkout(&self, new_order: NewOrder, cart: &Cart) -> AppResult<Order>;

    /// Orders of the user in the order they were recorded.
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Order>>;
}

/// Aggregates all repositories for convenient access.
///
/// Every field is an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    /// Builds all repositories on top of a single store.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            items: store.clone(),
            carts: store.clone(),
            orders: store,
        }
    }

    /// Creates repositories backed by a fresh in-process store.
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}
