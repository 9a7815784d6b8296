//! Upvote database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for upvotes table
#[derive(Debug, Clone, FromRow)]
pub struct UpvoteModel {
    pub id: Uuid,
    pub user_id: String,
    pub tool_id: String,
    pub upvoted_at: DateTime<Utc>,
    pub upvote_date: NaiveDate,
    pub monthly_reset_date: NaiveDate,
}

/// Aggregated upvote count per tool (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ToolCountModel {
    pub tool_id: String,
    pub count: i64,
}
