//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{FavoriteRecord, ToolTally, UpvoteRecord};
use crate::error::DomainError;
use crate::value_objects::{DayWindow, ToolId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Upvote Repository
// ============================================================================

#[async_trait]
pub trait UpvoteRepository: Send + Sync {
    /// Insert an upvote if the user has no vote for this tool on the record's
    /// UTC day and has cast fewer than `daily_limit` votes that day.
    ///
    /// The checks and the insert form one atomic unit against concurrent
    /// callers. Fails with `DuplicateVote` or `DailyLimitReached`.
    async fn insert_within_quota(&self, record: &UpvoteRecord, daily_limit: u32)
        -> RepoResult<()>;

    /// Delete the user's votes for a tool cast inside the window
    async fn delete_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<u64>;

    /// Check if the user voted for the tool inside the window
    async fn exists_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<bool>;

    /// Subset of `tool_ids` the user voted for inside the window (single query)
    async fn voted_tools_in_window(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
        window: DayWindow,
    ) -> RepoResult<HashSet<ToolId>>;

    /// Count the user's votes across all tools inside the window
    async fn count_by_user_in_window(&self, user_id: &UserId, window: DayWindow)
        -> RepoResult<i64>;

    /// Count a tool's votes in a month bucket
    async fn count_for_tool(&self, tool_id: &ToolId, month: NaiveDate) -> RepoResult<i64>;

    /// Count votes in a month bucket for many tools (single query).
    /// Tools without votes are absent from the map.
    async fn count_for_tools(
        &self,
        tool_ids: &[ToolId],
        month: NaiveDate,
    ) -> RepoResult<HashMap<ToolId, i64>>;

    /// Tools with the most votes in a month bucket, highest first
    async fn top_tools(&self, month: NaiveDate, limit: i64) -> RepoResult<Vec<ToolTally>>;

    /// Delete every vote whose month bucket is before `month`
    async fn delete_before_month(&self, month: NaiveDate) -> RepoResult<u64>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Add a favorite; returns false if the pair was already favorited
    async fn insert(&self, record: &FavoriteRecord) -> RepoResult<bool>;

    /// Remove a favorite; returns false if there was nothing to remove
    async fn delete(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool>;

    /// Check if the user favorited the tool
    async fn exists(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool>;

    /// Subset of `tool_ids` the user favorited (single query)
    async fn favorited_tools(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
    ) -> RepoResult<HashSet<ToolId>>;

    /// The user's favorites, newest first
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<FavoriteRecord>>;
}
