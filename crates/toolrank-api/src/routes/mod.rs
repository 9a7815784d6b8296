//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, favorites, health, tools, upvotes, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(tool_routes())
        .merge(user_routes())
        .merge(admin_routes())
}

/// Tool routes
fn tool_routes() -> Router<AppState> {
    Router::new()
        // Listing pages
        .route("/tools/standings", get(tools::get_standings))
        .route("/tools/rankings", get(tools::get_rankings))
        // Upvotes
        .route(
            "/tools/:tool_id/upvote",
            get(upvotes::get_upvote_state)
                .post(upvotes::cast_upvote)
                .delete(upvotes::retract_upvote),
        )
        // Favorites
        .route(
            "/tools/:tool_id/favorite",
            get(favorites::get_favorite_state)
                .post(favorites::add_favorite)
                .delete(favorites::remove_favorite),
        )
}

/// Current-user routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/upvotes/quota", get(users::get_upvote_quota))
        .route("/users/@me/favorites", get(users::get_favorites))
}

/// Maintenance routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/upvotes/purge", post(admin::purge_stale_upvotes))
}
