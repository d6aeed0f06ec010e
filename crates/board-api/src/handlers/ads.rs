//! Ad handlers
//!
//! Endpoints for ads and their images.

use axum::{extract::State, Json};
use board_service::{AdResponse, AdsResponse, CreateOrUpdateAdRequest, ExtendedAdResponse};

use crate::extractors::{AdForm, AdIdPath, ApiPath, AuthUser, ImageForm, JsonBody};
use crate::response::{ApiError, ApiResult, Created, ImageBody, NoContent};
use crate::state::AppState;

/// List all ads
///
/// GET /ads
pub async fn list_ads(State(state): State<AppState>) -> ApiResult<Json<AdsResponse>> {
    let service = state.ads();
    let response = service.list_all().await?;
    Ok(Json(response))
}

/// Create an ad (multipart `properties` + `image`)
///
/// POST /ads
pub async fn create_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    form: AdForm,
) -> ApiResult<Created<Json<AdResponse>>> {
    let service = state.ads();
    let response = service
        .create(&auth.identity, form.properties, form.image)
        .await?;
    Ok(Created(Json(response)))
}

/// Ads of the current user
///
/// GET /ads/me
pub async fn list_my_ads(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AdsResponse>> {
    let service = state.ads();
    let response = service.list_mine(&auth.identity).await?;
    Ok(Json(response))
}

/// Ad detail
///
/// GET /ads/{id}
pub async fn get_ad(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<AdIdPath>,
) -> ApiResult<Json<ExtendedAdResponse>> {
    let service = state.ads();
    let response = service.get(path.ad_id()?).await?;
    Ok(Json(response))
}

/// Partially update an ad
///
/// PATCH /ads/{id}
pub async fn update_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdIdPath>,
    JsonBody(request): JsonBody<CreateOrUpdateAdRequest>,
) -> ApiResult<Json<AdResponse>> {
    let service = state.ads();
    let response = service.update(path.ad_id()?, request, &auth.identity).await?;
    Ok(Json(response))
}

/// Delete an ad
///
/// DELETE /ads/{id}
pub async fn delete_ad(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdIdPath>,
) -> ApiResult<NoContent> {
    let service = state.ads();
    service.delete(path.ad_id()?, &auth.identity).await?;
    Ok(NoContent)
}

/// Replace the ad image (multipart `image`)
///
/// PATCH /ads/{id}/image
pub async fn update_ad_image(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdIdPath>,
    ImageForm(image): ImageForm,
) -> ApiResult<Json<AdResponse>> {
    let service = state.ads();
    let response = service
        .replace_image(path.ad_id()?, image, &auth.identity)
        .await?;
    Ok(Json(response))
}

/// Raw ad image, 404 when the ad has none
///
/// GET /ads/{id}/image
pub async fn get_ad_image(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<AdIdPath>,
) -> ApiResult<ImageBody> {
    let id = path.ad_id()?;
    let service = state.ads();
    service
        .load_image(id)
        .await?
        .map(ImageBody)
        .ok_or_else(|| ApiError::not_found("Ad image", id))
}
