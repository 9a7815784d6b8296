//! Upvote handlers
//!
//! Endpoints for casting, retracting and reading a tool's upvotes.

use axum::{extract::State, Json};
use toolrank_service::{UpvoteResponse, UpvoteService};

use crate::extractors::{AuthUser, OptionalAuthUser, ToolIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Upvote a tool
///
/// POST /tools/{tool_id}/upvote
pub async fn cast_upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<UpvoteResponse>> {
    let service = UpvoteService::new(state.service_context());
    let response = service.cast_upvote(&auth.user_id, &tool_id).await?;
    Ok(Json(response))
}

/// Retract today's upvote (no-op when there is none)
///
/// DELETE /tools/{tool_id}/upvote
pub async fn retract_upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<UpvoteResponse>> {
    let service = UpvoteService::new(state.service_context());
    let response = service.retract_upvote(&auth.user_id, &tool_id).await?;
    Ok(Json(response))
}

/// Get a tool's visible count and the caller's vote state
///
/// GET /tools/{tool_id}/upvote
pub async fn get_upvote_state(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ToolIdPath(tool_id): ToolIdPath,
) -> ApiResult<Json<UpvoteResponse>> {
    let service = UpvoteService::new(state.service_context());
    let response = service.upvote_state(viewer.user_id(), &tool_id).await?;
    Ok(Json(response))
}
