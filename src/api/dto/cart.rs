//! Cart DTOs

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ItemResponse;
use crate::models::Cart;

/// Body of `addToCart` / `removeFromCart`.
///
/// `quantity` is not range-checked here: a non-positive add is reported by
/// the cart itself, and a non-positive remove is a no-op.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = 1)]
    pub item_id: i64,
    #[schema(example = 2)]
    pub quantity: i32,
}

/// Cart snapshot; `items` holds one entry per unit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<ItemResponse>,
    #[schema(value_type = String, example = "8.99")]
    pub total: BigDecimal,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            user_id: cart.user_id,
            items: cart.items.into_iter().map(ItemResponse::from).collect(),
            total: cart.total,
        }
    }
}
