//! Checkout and order history, mounted behind the auth gate.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ORDER_TAG;
use crate::api::dto::{ErrorResponse, OrderResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::jwt::Identity;

/// - `POST /submit/{username}`
/// - `GET /history/{username}`
pub fn order_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(submit_order))
        .routes(routes!(order_history))
}

/// Converts the cart into an order and empties it. An empty cart still
/// produces an order with no entries.
#[utoipa::path(
    post,
    path = "/submit/{username}",
    tag = ORDER_TAG,
    params(("username" = String, Path, description = "Cart owner")),
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Cart belongs to another user", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn submit_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.services.orders.submit(&identity, &username).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// Orders in submission order.
#[utoipa::path(
    get,
    path = "/history/{username}",
    tag = ORDER_TAG,
    params(("username" = String, Path, description = "Order owner")),
    responses(
        (status = 200, description = "Order history", body = Vec<OrderResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "History belongs to another user", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn order_history(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = state.services.orders.history(&identity, &username).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
