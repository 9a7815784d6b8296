//! Daily quota guard
//!
//! Pre-insert check giving the caller a precise reason for a rejection. The
//! storage layer repeats both checks atomically with the insert, so a request
//! that slips past the guard under a race still cannot break the cap.

use chrono::{DateTime, Utc};
use toolrank_core::entities::QuotaUsage;
use toolrank_core::error::DomainError;
use toolrank_core::value_objects::{DayWindow, ToolId, UserId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Daily quota guard
pub struct DailyQuotaGuard<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DailyQuotaGuard<'a> {
    /// Create a new DailyQuotaGuard
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Decide whether `user_id` may upvote `tool_id` at `now`
    ///
    /// Returns the user's usage before this vote.
    ///
    /// # Errors
    /// `AlreadyVotedToday` if the pair already has a vote in today's window,
    /// `DailyLimitReached` if the user is at the cap.
    #[instrument(skip(self))]
    pub async fn authorize(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        now: DateTime<Utc>,
    ) -> ServiceResult<QuotaUsage> {
        let today = DayWindow::containing(now);
        let repo = self.ctx.upvote_repo();

        if repo.exists_in_window(user_id, tool_id, today).await? {
            debug!(user_id = %user_id, tool_id = %tool_id, "Upvote rejected: already voted today");
            return Err(DomainError::AlreadyVotedToday.into());
        }

        let usage = self.usage(user_id, now).await?;
        if usage.is_exhausted() {
            debug!(user_id = %user_id, used = usage.used, "Upvote rejected: daily limit reached");
            return Err(DomainError::DailyLimitReached {
                limit: usage.limit,
                used: usage.used,
            }
            .into());
        }

        Ok(usage)
    }

    /// How much of today's cap the user has consumed
    pub async fn usage(&self, user_id: &UserId, now: DateTime<Utc>) -> ServiceResult<QuotaUsage> {
        let used = self
            .ctx
            .upvote_repo()
            .count_by_user_in_window(user_id, DayWindow::containing(now))
            .await?;
        Ok(QuotaUsage::new(
            self.ctx.daily_limit(),
            u32::try_from(used).unwrap_or(u32::MAX),
        ))
    }
}
