//! Favorite entity - a user's bookmark of a tool

use chrono::{DateTime, Utc};

use crate::value_objects::{RecordId, ToolId, UserId};

/// Favorite entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub tool_id: ToolId,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Create a new FavoriteRecord
    pub fn new(user_id: UserId, tool_id: ToolId, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(),
            user_id,
            tool_id,
            created_at: now,
        }
    }

    /// Check if this favorite belongs to the given pair
    #[inline]
    pub fn matches(&self, user_id: &UserId, tool_id: &ToolId) -> bool {
        &self.user_id == user_id && &self.tool_id == tool_id
    }
}
