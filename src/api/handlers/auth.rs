//! Login handler.

use axum::{Json, extract::State, http::header};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{LoginRequest, LoginResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// # Routes
/// - `POST /login` - Exchange a username and password for a bearer token
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(login))
}

/// POST /login - Authenticate user
///
/// The token is returned in the body and, for clients that read headers, in
/// `Authorization` as well.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse,
            headers(("Authorization" = String, description = "Bearer <token>"))),
        (status = 400, description = "Malformed body", body = crate::api::dto::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::api::dto::ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<([(header::HeaderName, String); 1], Json<LoginResponse>)> {
    let (_user, issued) = state
        .services
        .auth
        .login(&payload.username, &payload.password)
        .await?;

    let bearer = format!("Bearer {}", issued.token);
    Ok(([(header::AUTHORIZATION, bearer)], Json(issued.into())))
}
