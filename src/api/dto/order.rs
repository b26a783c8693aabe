use bigdecimal::BigDecimal;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ItemResponse;
use crate::models::Order;

/// Submitted order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<ItemResponse>,
    #[schema(value_type = String, example = "6.00")]
    pub total: BigDecimal,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            items: order.items.into_iter().map(ItemResponse::from).collect(),
            total: order.total,
            created_at: order.created_at,
        }
    }
}
