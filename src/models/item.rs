use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Catalog entry. Read-only from the cart's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
}

/// NewItem model for inserting catalog entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: BigDecimal,
    pub description: String,
}
