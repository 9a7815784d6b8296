//! Favorite entity <-> model mapper

use toolrank_core::entities::FavoriteRecord;
use toolrank_core::error::DomainError;
use toolrank_core::value_objects::RecordId;

use crate::models::FavoriteModel;

use super::upvote::{parse_tool_id, parse_user_id};

impl TryFrom<FavoriteModel> for FavoriteRecord {
    type Error = DomainError;

    fn try_from(model: FavoriteModel) -> Result<Self, Self::Error> {
        Ok(FavoriteRecord {
            id: RecordId::from_uuid(model.id),
            user_id: parse_user_id(model.user_id)?,
            tool_id: parse_tool_id(model.tool_id)?,
            created_at: model.created_at,
        })
    }
}
