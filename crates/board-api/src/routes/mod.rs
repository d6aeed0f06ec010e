//! Route definitions
//!
//! All API routes, mounted at the root where the web frontend expects them.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{ads, auth, comments, health, users};
use crate::middleware::require_ad_mutation_rights;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Create the main API router with all routes
///
/// The state is needed up front for the ad guard middleware.
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(ad_routes(state))
        .merge(comment_routes())
        .merge(user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Ad routes. Mutations of an existing ad pass through the guard.
fn ad_routes(state: &AppState) -> Router<AppState> {
    let guard = from_fn_with_state(state.clone(), require_ad_mutation_rights);

    Router::new()
        .route("/ads", get(ads::list_ads).post(ads::create_ad))
        .route("/ads/me", get(ads::list_my_ads))
        .route("/ads/:id", get(ads::get_ad))
        .route(
            "/ads/:id",
            patch(ads::update_ad)
                .delete(ads::delete_ad)
                .route_layer(guard.clone()),
        )
        .route("/ads/:id/image", get(ads::get_ad_image))
        .route("/ads/:id/image", patch(ads::update_ad_image).route_layer(guard))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ads/:id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/ads/:id/comments/:comment_id",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/me/image", patch(users::update_avatar))
        .route("/users/set_password", post(users::set_password))
        .route("/users/:id/image", get(users::get_avatar))
}
