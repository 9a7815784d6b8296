//! Current-user handlers

use axum::{extract::State, Json};
use toolrank_service::{
    FavoriteListResponse, FavoriteService, LimitQuery, QuotaResponse, UpvoteService,
};

use crate::extractors::{AuthUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Today's quota usage and the daily and monthly reset timers
///
/// GET /users/@me/upvotes/quota
pub async fn get_upvote_quota(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<QuotaResponse>> {
    let service = UpvoteService::new(state.service_context());
    let response = service.quota_status(&auth.user_id).await?;
    Ok(Json(response))
}

/// Caller's favorites, newest first
///
/// GET /users/@me/favorites
pub async fn get_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<LimitQuery>,
) -> ApiResult<Json<FavoriteListResponse>> {
    let service = FavoriteService::new(state.service_context());
    let response = service
        .list_favorites(&auth.user_id, query.limit())
        .await?;
    Ok(Json(response))
}
