//! Maintenance handlers
//!
//! Require a token carrying the configured admin role.

use axum::{extract::State, Json};
use toolrank_service::{MaintenanceService, PurgeRequest, PurgeResponse};
use tracing::info;

use crate::extractors::{AdminUser, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Delete upvotes from closed month buckets
///
/// POST /admin/upvotes/purge
pub async fn purge_stale_upvotes(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    OptionalValidatedJson(request): OptionalValidatedJson<PurgeRequest>,
) -> ApiResult<Json<PurgeResponse>> {
    let as_of = request.and_then(|r| r.as_of);
    info!(admin_id = %admin.user_id, ?as_of, "Purge requested");

    let service = MaintenanceService::new(state.service_context());
    let response = service.purge_stale_upvotes(as_of).await?;
    Ok(Json(response))
}
