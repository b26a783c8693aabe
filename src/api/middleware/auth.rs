//! Bearer token gate for protected routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Verifies `Authorization: Bearer <token>` and stores the caller's
/// [`Identity`](crate::utils::jwt::Identity) in the request extensions.
///
/// Handlers behind this layer extract it with `Extension<Identity>`.
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - The header is not a Bearer credential
/// - The token is malformed, wrongly signed or expired
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let identity = state.services.auth.authenticate(token.trim()).map_err(|failure| {
        tracing::debug!(reason = %failure, "Rejected bearer token");
        AppError::from(failure)
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
