//! Maintenance service
//!
//! Storage reclamation for upvotes whose month bucket has closed. Visible
//! counts only ever read the current bucket, so the purge can be skipped
//! indefinitely without changing what users see.

use chrono::{DateTime, NaiveDate, Utc};
use toolrank_core::value_objects::month_start;
use tracing::{info, instrument};

use crate::dto::PurgeResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maintenance service
pub struct MaintenanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new MaintenanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete every upvote whose bucket precedes the month of `as_of` (default: now)
    ///
    /// # Errors
    /// Rejects an `as_of` in a later month than now, which would purge votes
    /// that are still visible.
    #[instrument(skip(self))]
    pub async fn purge_stale_upvotes(
        &self,
        as_of: Option<DateTime<Utc>>,
    ) -> ServiceResult<PurgeResponse> {
        let now = self.ctx.now();
        let as_of = as_of.unwrap_or(now);
        let current_month_start = month_start(as_of);

        if current_month_start > month_start(now) {
            return Err(ServiceError::validation(
                "asOf must not be in a later month than the current one",
            ));
        }

        let deleted_count = self.purge_older_than(current_month_start).await?;

        Ok(PurgeResponse {
            deleted_count,
            current_month_start,
        })
    }

    /// Delete every upvote with `monthly_reset_date < current_month_start`
    pub async fn purge_older_than(&self, current_month_start: NaiveDate) -> ServiceResult<u64> {
        let deleted = self
            .ctx
            .upvote_repo()
            .delete_before_month(current_month_start)
            .await?;

        info!(deleted, %current_month_start, "Stale upvotes purged");
        Ok(deleted)
    }
}
