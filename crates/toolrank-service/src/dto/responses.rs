//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase
//! field names, which is what the directory's web client reads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Upvote Responses
// ============================================================================

/// Upvote state of one tool for the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    pub upvote_count: i64,
    pub user_upvoted: bool,
}

/// Caller's daily quota and the two reset timers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaResponse {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
    pub daily_reset_at: DateTime<Utc>,
    pub seconds_until_daily_reset: i64,
    pub monthly_reset_at: NaiveDate,
    pub days_until_monthly_reset: i64,
}

// ============================================================================
// Favorite Responses
// ============================================================================

/// Favorite state of one tool for the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteResponse {
    pub favorited: bool,
}

/// One favorited tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub tool_id: String,
    pub favorited_at: DateTime<Utc>,
}

/// The caller's favorites, newest first
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteListResponse {
    pub favorites: Vec<FavoriteEntry>,
}

// ============================================================================
// Ranking Responses
// ============================================================================

/// Everything a listing page shows for one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStandingResponse {
    pub tool_id: String,
    pub upvote_count: i64,
    pub user_upvoted: bool,
    pub favorited: bool,
}

/// Standings for a batch of tools, in request order
#[derive(Debug, Clone, Serialize)]
pub struct StandingsResponse {
    pub tools: Vec<ToolStandingResponse>,
}

/// One row of the monthly leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: usize,
    pub tool_id: String,
    pub upvote_count: i64,
}

/// Monthly leaderboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    pub month_start: NaiveDate,
    pub tools: Vec<RankingEntry>,
}

// ============================================================================
// Maintenance Responses
// ============================================================================

/// Result of a purge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub deleted_count: u64,
    pub current_month_start: NaiveDate,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
