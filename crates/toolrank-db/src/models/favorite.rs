//! Favorite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for favorites table
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteModel {
    pub id: Uuid,
    pub user_id: String,
    pub tool_id: String,
    pub created_at: DateTime<Utc>,
}
