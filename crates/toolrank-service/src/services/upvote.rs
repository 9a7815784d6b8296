//! Upvote service
//!
//! Ledger operations: cast, retract, and the per-tool and per-user reads.
//! Every count is recomputed from storage on each call.

use std::collections::{HashMap, HashSet};

use toolrank_core::entities::UpvoteRecord;
use toolrank_core::value_objects::{month_start, DayWindow, ToolId, UserId};
use tracing::{info, instrument};

use crate::dto::{QuotaResponse, UpvoteResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::quota::DailyQuotaGuard;

/// Upvote service
pub struct UpvoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UpvoteService<'a> {
    /// Create a new UpvoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upvote a tool
    ///
    /// Returns the tool's visible count including the new vote.
    #[instrument(skip(self))]
    pub async fn cast_upvote(&self, user_id: &UserId, tool_id: &ToolId) -> ServiceResult<UpvoteResponse> {
        let now = self.ctx.now();

        DailyQuotaGuard::new(self.ctx)
            .authorize(user_id, tool_id, now)
            .await?;

        let record = UpvoteRecord::new(user_id.clone(), tool_id.clone(), now);
        self.ctx
            .upvote_repo()
            .insert_within_quota(&record, self.ctx.daily_limit())
            .await?;

        let upvote_count = self
            .ctx
            .upvote_repo()
            .count_for_tool(tool_id, record.monthly_reset_date)
            .await?;

        info!(
            user_id = %user_id,
            tool_id = %tool_id,
            upvote_count,
            "Upvote cast"
        );

        Ok(UpvoteResponse {
            upvote_count,
            user_upvoted: true,
        })
    }

    /// Undo today's upvote for a tool
    ///
    /// A no-op when there is nothing to undo. Votes from earlier days are
    /// never touched. `user_upvoted` is read back from storage after the delete.
    #[instrument(skip(self))]
    pub async fn retract_upvote(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
    ) -> ServiceResult<UpvoteResponse> {
        let now = self.ctx.now();
        let today = DayWindow::containing(now);
        let repo = self.ctx.upvote_repo();

        let deleted = repo.delete_in_window(user_id, tool_id, today).await?;
        let user_upvoted = repo.exists_in_window(user_id, tool_id, today).await?;
        let upvote_count = repo.count_for_tool(tool_id, month_start(now)).await?;

        if deleted > 0 {
            info!(
                user_id = %user_id,
                tool_id = %tool_id,
                upvote_count,
                "Upvote retracted"
            );
        }

        Ok(UpvoteResponse {
            upvote_count,
            user_upvoted,
        })
    }

    /// Visible count and, for a signed-in caller, whether they voted today
    #[instrument(skip(self))]
    pub async fn upvote_state(
        &self,
        viewer: Option<&UserId>,
        tool_id: &ToolId,
    ) -> ServiceResult<UpvoteResponse> {
        let upvote_count = self.visible_count(tool_id).await?;
        let user_upvoted = match viewer {
            Some(user_id) => self.has_voted_today(user_id, tool_id).await?,
            None => false,
        };

        Ok(UpvoteResponse {
            upvote_count,
            user_upvoted,
        })
    }

    /// Votes for the tool in the current month bucket
    pub async fn visible_count(&self, tool_id: &ToolId) -> ServiceResult<i64> {
        let month = month_start(self.ctx.now());
        Ok(self.ctx.upvote_repo().count_for_tool(tool_id, month).await?)
    }

    /// Visible counts for many tools in one query; every requested id is present
    pub async fn visible_counts(&self, tool_ids: &[ToolId]) -> ServiceResult<HashMap<ToolId, i64>> {
        let month = month_start(self.ctx.now());
        let mut counts = self
            .ctx
            .upvote_repo()
            .count_for_tools(tool_ids, month)
            .await?;
        for tool_id in tool_ids {
            counts.entry(tool_id.clone()).or_insert(0);
        }
        Ok(counts)
    }

    /// Whether the user voted for the tool in today's UTC window
    pub async fn has_voted_today(&self, user_id: &UserId, tool_id: &ToolId) -> ServiceResult<bool> {
        let today = DayWindow::containing(self.ctx.now());
        Ok(self
            .ctx
            .upvote_repo()
            .exists_in_window(user_id, tool_id, today)
            .await?)
    }

    /// The subset of `tool_ids` the user voted for today, in one query
    pub async fn has_voted_today_batch(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
    ) -> ServiceResult<HashSet<ToolId>> {
        let today = DayWindow::containing(self.ctx.now());
        Ok(self
            .ctx
            .upvote_repo()
            .voted_tools_in_window(user_id, tool_ids, today)
            .await?)
    }

    /// The user's votes across all tools in today's UTC window
    pub async fn todays_vote_count(&self, user_id: &UserId) -> ServiceResult<i64> {
        let today = DayWindow::containing(self.ctx.now());
        Ok(self
            .ctx
            .upvote_repo()
            .count_by_user_in_window(user_id, today)
            .await?)
    }

    /// Remaining quota and reset timers for the user
    #[instrument(skip(self))]
    pub async fn quota_status(&self, user_id: &UserId) -> ServiceResult<QuotaResponse> {
        let now = self.ctx.now();
        let usage = DailyQuotaGuard::new(self.ctx).usage(user_id, now).await?;
        Ok(QuotaResponse::from_usage(usage, now))
    }
}
