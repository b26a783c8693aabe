//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, http::header, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    auth_middleware, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID (outermost) - generates/propagates request IDs
/// 2. Logging - logs requests inside a span carrying the request ID
/// 3. CORS and compression
/// 4. Global error handler - JSON bodies for extractor and routing errors
/// 5. Auth gate - only on protected routes
///
/// # Routes
/// - `POST /login`
/// - `/api/user`, `/api/item`, `/api/cart`, `/api/order`, `/api/health`
/// - `/swagger-ui` and `/api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let protected = OpenApiRouter::new()
        .nest("/api/user", handlers::users::protected_user_routes())
        .nest("/api/cart", handlers::cart::cart_routes())
        .nest("/api/order", handlers::orders::order_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let public = OpenApiRouter::new()
        .merge(handlers::auth::auth_routes())
        .nest("/api/user", handlers::users::public_user_routes())
        .nest("/api/item", handlers::items::item_routes())
        .nest("/api/health", handlers::health::health_routes());

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(public)
        .merge(protected)
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::AUTHORIZATION]);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
