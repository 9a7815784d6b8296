//! Tool listing handlers
//!
//! Batch endpoints used by the directory's listing pages.

use axum::{extract::State, Json};
use toolrank_service::{
    LimitQuery, RankingService, RankingsResponse, StandingsQuery, StandingsResponse,
};

use crate::extractors::{OptionalAuthUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Counts plus the caller's vote and favorite state for many tools
///
/// GET /tools/standings?ids=a,b,c
pub async fn get_standings(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<StandingsQuery>,
) -> ApiResult<Json<StandingsResponse>> {
    let tool_ids = query.tool_ids()?;
    let service = RankingService::new(state.service_context());
    let response = service.standings(viewer.user_id(), &tool_ids).await?;
    Ok(Json(response))
}

/// This month's leaderboard
///
/// GET /tools/rankings?limit=n
pub async fn get_rankings(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LimitQuery>,
) -> ApiResult<Json<RankingsResponse>> {
    let service = RankingService::new(state.service_context());
    let response = service.rankings(query.limit()).await?;
    Ok(Json(response))
}
