//! Upvote entity - one user's vote for one tool on one UTC day

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{month_start, DayWindow, RecordId, ToolId, UserId};

/// Maximum number of distinct tools a user may upvote per UTC day
pub const DEFAULT_DAILY_UPVOTE_LIMIT: u32 = 3;

/// Upvote ledger entry
///
/// `monthly_reset_date` is derived from `upvoted_at` once, at creation, and
/// stored alongside it so month-scoped reads and purges filter on a plain
/// date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpvoteRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub tool_id: ToolId,
    pub upvoted_at: DateTime<Utc>,
    pub monthly_reset_date: NaiveDate,
}

impl UpvoteRecord {
    /// Create a new UpvoteRecord cast at `now`
    pub fn new(user_id: UserId, tool_id: ToolId, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            user_id,
            tool_id,
            upvoted_at: now,
            monthly_reset_date: month_start(now),
        }
    }

    /// UTC calendar day the vote belongs to
    #[inline]
    pub fn upvote_date(&self) -> NaiveDate {
        self.upvoted_at.date_naive()
    }

    /// Check if the vote was cast inside the given day window
    #[inline]
    pub fn is_within(&self, window: &DayWindow) -> bool {
        window.contains(self.upvoted_at)
    }

    /// Check if the vote counts towards the given month bucket
    #[inline]
    pub fn counts_in_month(&self, month: NaiveDate) -> bool {
        self.monthly_reset_date == month
    }
}

/// Visible upvote total of one tool in one month bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTally {
    pub tool_id: ToolId,
    pub upvote_count: i64,
}

impl ToolTally {
    pub fn new(tool_id: ToolId, upvote_count: i64) -> Self {
        Self {
            tool_id,
            upvote_count,
        }
    }
}

/// How much of the daily cap a user has consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaUsage {
    pub limit: u32,
    pub used: u32,
}

impl QuotaUsage {
    pub fn new(limit: u32, used: u32) -> Self {
        Self { limit, used }
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}
