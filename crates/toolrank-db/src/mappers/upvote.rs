//! Upvote entity <-> model mappers

use toolrank_core::entities::{ToolTally, UpvoteRecord};
use toolrank_core::error::DomainError;
use toolrank_core::value_objects::{RecordId, ToolId, UserId};
use uuid::Uuid;

use crate::models::{ToolCountModel, UpvoteModel};

/// Convert UpvoteModel to UpvoteRecord entity
///
/// Identities were validated on the way in; a row that no longer parses means
/// the table was written by something else, so it surfaces as an internal error.
impl TryFrom<UpvoteModel> for UpvoteRecord {
    type Error = DomainError;

    fn try_from(model: UpvoteModel) -> Result<Self, Self::Error> {
        Ok(UpvoteRecord {
            id: RecordId::from_uuid(model.id),
            user_id: parse_user_id(model.user_id)?,
            tool_id: parse_tool_id(model.tool_id)?,
            upvoted_at: model.upvoted_at,
            monthly_reset_date: model.monthly_reset_date,
        })
    }
}

impl TryFrom<ToolCountModel> for ToolTally {
    type Error = DomainError;

    fn try_from(model: ToolCountModel) -> Result<Self, Self::Error> {
        Ok(ToolTally::new(parse_tool_id(model.tool_id)?, model.count))
    }
}

pub(crate) fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::parse(raw).map_err(|e| DomainError::InternalError(format!("stored user id: {e}")))
}

pub(crate) fn parse_tool_id(raw: String) -> Result<ToolId, DomainError> {
    ToolId::parse(raw).map_err(|e| DomainError::InternalError(format!("stored tool id: {e}")))
}

/// Borrowed column values for inserting an upvote
pub struct UpvoteInsert<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub tool_id: &'a str,
    pub upvoted_at: chrono::DateTime<chrono::Utc>,
    pub upvote_date: chrono::NaiveDate,
    pub monthly_reset_date: chrono::NaiveDate,
}

impl<'a> UpvoteInsert<'a> {
    pub fn new(record: &'a UpvoteRecord) -> Self {
        Self {
            id: record.id.into_inner(),
            user_id: record.user_id.as_str(),
            tool_id: record.tool_id.as_str(),
            upvoted_at: record.upvoted_at,
            upvote_date: record.upvote_date(),
            monthly_reset_date: record.monthly_reset_date,
        }
    }
}

/// Tool ids as plain strings for `= ANY($n)` binds
pub fn tool_id_strings(tool_ids: &[ToolId]) -> Vec<String> {
    tool_ids.iter().map(|id| id.as_str().to_owned()).collect()
}
