//! Catalog handlers. All anonymous.

use axum::{
    Json,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ITEM_TAG;
use crate::api::dto::{ErrorResponse, ItemResponse};
use crate::error::AppResult;
use crate::state::AppState;

/// - `GET /` - List the catalog
/// - `GET /{id}` - Get item by ID
/// - `GET /name/{name}` - Items with exactly this name
pub fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_items))
        .routes(routes!(get_item))
        .routes(routes!(get_items_by_name))
}

#[utoipa::path(
    get,
    path = "/",
    tag = ITEM_TAG,
    responses((status = 200, description = "Every catalog item", body = Vec<ItemResponse>))
)]
async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state.services.items.list_items().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = ITEM_TAG,
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "No such item", body = ErrorResponse)
    )
)]
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemResponse>> {
    let item = state.services.items.get_item(id).await?;
    Ok(Json(ItemResponse::from(item)))
}

#[utoipa::path(
    get,
    path = "/name/{name}",
    tag = ITEM_TAG,
    params(("name" = String, Path, description = "Exact item name")),
    responses(
        (status = 200, description = "Matching items", body = Vec<ItemResponse>),
        (status = 404, description = "No item has this name", body = ErrorResponse)
    )
)]
async fn get_items_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state.services.items.find_by_name(&name).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}
