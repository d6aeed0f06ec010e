//! Comment handlers

use axum::{extract::State, Json};
use board_service::{CommentResponse, CommentsResponse, CreateOrUpdateCommentRequest};

use crate::extractors::{AdCommentPath, AdIdPath, ApiPath, AuthUser, JsonBody};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /ads/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<AdIdPath>,
) -> ApiResult<Json<CommentsResponse>> {
    let service = state.comments();
    let response = service.list_for_ad(path.ad_id()?).await?;
    Ok(Json(response))
}

/// POST /ads/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdIdPath>,
    JsonBody(request): JsonBody<CreateOrUpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = state.comments();
    let response = service.add(path.ad_id()?, request, &auth.identity).await?;
    Ok(Json(response))
}

/// PATCH /ads/{id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdCommentPath>,
    JsonBody(request): JsonBody<CreateOrUpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = state.comments();
    let response = service
        .update(path.ad_id()?, path.comment_id()?, request, &auth.identity)
        .await?;
    Ok(Json(response))
}

/// DELETE /ads/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdCommentPath>,
) -> ApiResult<NoContent> {
    let service = state.comments();
    service
        .delete(path.ad_id()?, path.comment_id()?, &auth.identity)
        .await?;
    Ok(NoContent)
}
