//! Authentication handlers
//!
//! Endpoints for account registration and login.

use axum::{extract::State, Json};
use board_service::{AccessToken, LoginRequest, RegisterRequest, UserResponse};

use crate::extractors::{JsonBody, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new account
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = state.accounts();
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let service = state.accounts();
    let response = service.login(request).await?;
    Ok(Json(response))
}
