//! Favorite handlers

use axum::{extract::State, Json};
use toolrank_service::{FavoriteResponse, FavoriteService};

use crate::extractors::{AuthUser, OptionalAuthUser, ToolIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Favorite a tool
///
/// POST /tools/{tool_id}/favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<FavoriteResponse>> {
    let service = FavoriteService::new(state.service_context());
    let response = service.set_favorite(&auth.user_id, &tool_id, true).await?;
    Ok(Json(response))
}

/// Unfavorite a tool
///
/// DELETE /tools/{tool_id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<FavoriteResponse>> {
    let service = FavoriteService::new(state.service_context());
    let response = service.set_favorite(&auth.user_id, &tool_id, false).await?;
    Ok(Json(response))
}

/// Get the caller's favorite state for a tool
///
/// GET /tools/{tool_id}/favorite
pub async fn get_favorite_state(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<FavoriteResponse>> {
    let service = FavoriteService::new(state.service_context());
    let response = service.is_favorited(viewer.user_id(), &tool_id).await?;
    Ok(Json(response))
}
