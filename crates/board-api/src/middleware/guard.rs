//! Ad mutation guard
//!
//! Runs before the update, delete and image-replace handlers and answers 403
//! unless the caller is an admin or the ad's owner. The services check again.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::extractors::{AdIdPath, ApiPath, AuthUser};
use crate::response::ApiError;
use crate::state::AppState;

pub async fn require_ad_mutation_rights(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AdIdPath>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ad_id = path.ad_id()?;

    let allowed = state
        .authorization()
        .can_mutate_ad(ad_id, &auth.identity)
        .await;

    if !allowed {
        debug!(ad_id = %ad_id, email = %auth.identity.email, "Ad mutation blocked by guard");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
