//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - registration and user lookup
//! - `auth` - login
//! - `item` - catalog entries
//! - `cart` - cart mutation requests and cart snapshots
//! - `order` - submitted orders
//! - `error` - common error response
//! - `health` - liveness report

mod auth;
mod cart;
mod error;
mod health;
mod item;
mod order;
mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use cart::{CartRequest, CartResponse};
pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use item::ItemResponse;
pub use order::OrderResponse;
pub use user::{CreateUserRequest, UserResponse};
