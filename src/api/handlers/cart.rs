//! Cart mutation handlers, mounted behind the auth gate.

use axum::{Extension, Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CART_TAG;
use crate::api::dto::{CartRequest, CartResponse, ErrorResponse};
use crate::error::AppResult;
use crate::models::CartOperation;
use crate::state::AppState;
use crate::utils::jwt::Identity;
use crate::utils::validate::ValidatedJson;

/// - `POST /addToCart`
/// - `POST /removeFromCart`
pub fn cart_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(add_to_cart))
        .routes(routes!(remove_from_cart))
}

/// Appends `quantity` units of the item.
#[utoipa::path(
    post,
    path = "/addToCart",
    tag = CART_TAG,
    request_body = CartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Quantity is not positive", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Cart belongs to another user", body = ErrorResponse),
        (status = 404, description = "Unknown user or item", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn add_to_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CartRequest>,
) -> AppResult<Json<CartResponse>> {
    mutate(&state, &identity, payload, CartOperation::Add).await
}

/// Removes up to `quantity` units of the item; asking for more than the
/// cart holds empties that item, and a non-positive quantity does nothing.
#[utoipa::path(
    post,
    path = "/removeFromCart",
    tag = CART_TAG,
    request_body = CartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Cart belongs to another user", body = ErrorResponse),
        (status = 404, description = "Unknown user or item", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CartRequest>,
) -> AppResult<Json<CartResponse>> {
    mutate(&state, &identity, payload, CartOperation::Remove).await
}

async fn mutate(
    state: &AppState,
    identity: &Identity,
    payload: CartRequest,
    operation: CartOperation,
) -> AppResult<Json<CartResponse>> {
    let cart = state
        .services
        .carts
        .mutate_cart(
            identity,
            &payload.username,
            payload.item_id,
            payload.quantity,
            operation,
        )
        .await?;
    Ok(Json(CartResponse::from(cart)))
}
