//! User handlers
//!
//! Endpoints for the current user's profile, password and avatar.

use axum::{extract::State, Json};
use board_service::{NewPasswordRequest, UpdateUserRequest, UserResponse};

use crate::extractors::{ApiPath, AuthUser, ImageForm, UserIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, ImageBody, NoContent};
use crate::state::AppState;

/// Get current user
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = state.users();
    let response = service.me(&auth.identity).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = state.users();
    let response = service.update(&auth.identity, request).await?;
    Ok(Json(response))
}

/// Change password
///
/// POST /users/set_password
pub async fn set_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<NewPasswordRequest>,
) -> ApiResult<NoContent> {
    let service = state.users();
    service.set_password(&auth.identity, request).await?;
    Ok(NoContent)
}

/// Replace avatar (multipart `image`)
///
/// PATCH /users/me/image
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    ImageForm(image): ImageForm,
) -> ApiResult<Json<UserResponse>> {
    let service = state.users();
    let response = service.replace_avatar(&auth.identity, image).await?;
    Ok(Json(response))
}

/// Raw avatar of any user, 404 when they have none
///
/// GET /users/{id}/image
pub async fn get_avatar(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<UserIdPath>,
) -> ApiResult<ImageBody> {
    let id = path.user_id()?;
    let service = state.users();
    service
        .load_avatar(id)
        .await?
        .map(ImageBody)
        .ok_or_else(|| ApiError::not_found("User image", id))
}
