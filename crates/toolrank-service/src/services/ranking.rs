//! Ranking service
//!
//! Listing-page standings and the monthly leaderboard. Each concern is read
//! with one batch query, however many tools are shown.

use toolrank_core::value_objects::{month_start, ToolId, UserId};
use tracing::instrument;

use crate::dto::{RankingEntry, RankingsResponse, StandingsResponse, ToolStandingResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::favorite::FavoriteService;
use super::upvote::UpvoteService;

/// Ranking service
pub struct RankingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RankingService<'a> {
    /// Create a new RankingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Count, vote and favorite state for each tool, in the order given
    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    pub async fn standings(
        &self,
        viewer: Option<&UserId>,
        tool_ids: &[ToolId],
    ) -> ServiceResult<StandingsResponse> {
        let upvotes = UpvoteService::new(self.ctx);
        let counts = upvotes.visible_counts(tool_ids).await?;

        let (voted, favorited) = match viewer {
            Some(user_id) => (
                upvotes.has_voted_today_batch(user_id, tool_ids).await?,
                FavoriteService::new(self.ctx)
                    .favorited_batch(user_id, tool_ids)
                    .await?,
            ),
            None => Default::default(),
        };

        let tools = tool_ids
            .iter()
            .map(|tool_id| ToolStandingResponse {
                tool_id: tool_id.to_string(),
                upvote_count: counts.get(tool_id).copied().unwrap_or(0),
                user_upvoted: voted.contains(tool_id),
                favorited: favorited.contains(tool_id),
            })
            .collect();

        Ok(StandingsResponse { tools })
    }

    /// Tools with the most votes this month, ties broken by tool id
    #[instrument(skip(self))]
    pub async fn rankings(&self, limit: i64) -> ServiceResult<RankingsResponse> {
        let month = month_start(self.ctx.now());
        let tallies = self.ctx.upvote_repo().top_tools(month, limit).await?;

        Ok(RankingsResponse {
            month_start: month,
            tools: tallies
                .into_iter()
                .enumerate()
                .map(|(i, tally)| RankingEntry::from_tally(i + 1, tally))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{tool, user, utc, Harness};
    use crate::services::{FavoriteService, UpvoteService};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_standings_in_request_order() {
        let h = Harness::at(utc(2024, 3, 15, 9, 0));
        let upvotes = UpvoteService::new(&h.ctx);
        upvotes.cast_upvote(&user("u1"), &tool("b")).await.unwrap();
        upvotes.cast_upvote(&user("u2"), &tool("b")).await.unwrap();
        FavoriteService::new(&h.ctx)
            .set_favorite(&user("u1"), &tool("c"), true)
            .await
            .unwrap();

        let ids = [tool("c"), tool("b"), tool("a")];
        let standings = RankingService::new(&h.ctx)
            .standings(Some(&user("u1")), &ids)
            .await
            .unwrap();

        let rows: Vec<(&str, i64, bool, bool)> = standings
            .tools
            .iter()
            .map(|t| (t.tool_id.as_str(), t.upvote_count, t.user_upvoted, t.favorited))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("c", 0, false, true),
                ("b", 2, true, false),
                ("a", 0, false, false)
            ]
        );

        let anonymous = RankingService::new(&h.ctx).standings(None, &ids).await.unwrap();
        assert!(anonymous.tools.iter().all(|t| !t.user_upvoted && !t.favorited));
    }

    #[tokio::test]
    async fn test_rankings_current_month_only() {
        let h = Harness::at(utc(2024, 2, 20, 9, 0));
        let upvotes = UpvoteService::new(&h.ctx);
        for u in ["u1", "u2", "u3"] {
            upvotes.cast_upvote(&user(u), &tool("old-favorite")).await.unwrap();
        }

        h.clock.set(utc(2024, 3, 15, 9, 0));
        upvotes.cast_upvote(&user("u1"), &tool("y")).await.unwrap();
        upvotes.cast_upvote(&user("u2"), &tool("x")).await.unwrap();
        upvotes.cast_upvote(&user("u3"), &tool("x")).await.unwrap();
        upvotes.cast_upvote(&user("u3"), &tool("z")).await.unwrap();

        let rankings = RankingService::new(&h.ctx).rankings(20).await.unwrap();
        assert_eq!(rankings.month_start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let order: Vec<(usize, &str, i64)> = rankings
            .tools
            .iter()
            .map(|e| (e.rank, e.tool_id.as_str(), e.upvote_count))
            .collect();
        assert_eq!(order, vec![(1, "x", 2), (2, "y", 1), (3, "z", 1)]);
    }
}
