//! Test fixtures and data generators
//!
//! Response shapes as clients see them, and unique identities per test.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user id for one test
pub fn unique_user() -> String {
    format!("user-{}", Uuid::new_v4())
}

/// Unique tool id for one test
pub fn unique_tool() -> String {
    format!("tool-{}", Uuid::new_v4())
}

/// Path of a tool's upvote resource
pub fn upvote_path(tool_id: &str) -> String {
    format!("/api/v1/tools/{tool_id}/upvote")
}

/// Path of a tool's favorite resource
pub fn favorite_path(tool_id: &str) -> String {
    format!("/api/v1/tools/{tool_id}/favorite")
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteBody {
    pub upvote_count: i64,
    pub user_upvoted: bool,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct FavoriteBody {
    pub favorited: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaBody {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
    pub daily_reset_at: DateTime<Utc>,
    pub seconds_until_daily_reset: i64,
    pub monthly_reset_at: NaiveDate,
    pub days_until_monthly_reset: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntryBody {
    pub tool_id: String,
    pub favorited_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteListBody {
    pub favorites: Vec<FavoriteEntryBody>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandingBody {
    pub tool_id: String,
    pub upvote_count: i64,
    pub user_upvoted: bool,
    pub favorited: bool,
}

#[derive(Debug, Deserialize)]
pub struct StandingsBody {
    pub tools: Vec<StandingBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingBody {
    pub rank: usize,
    pub tool_id: String,
    pub upvote_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsBody {
    pub month_start: NaiveDate,
    pub tools: Vec<RankingBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequestBody {
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeBody {
    pub deleted_count: u64,
    pub current_month_start: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetailBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
