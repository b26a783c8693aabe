use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Item;

/// Catalog entry as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Round Widget")]
    pub name: String,
    /// Exact decimal, serialized as a string
    #[schema(value_type = String, example = "2.99")]
    pub price: BigDecimal,
    #[schema(example = "A widget that is round")]
    pub description: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            description: item.description,
        }
    }
}
