//! Favorite service
//!
//! Toggle semantics: setting the state a pair already has is a no-op.

use std::collections::HashSet;

use toolrank_core::entities::FavoriteRecord;
use toolrank_core::value_objects::{ToolId, UserId};
use tracing::{info, instrument};

use crate::dto::{FavoriteEntry, FavoriteListResponse, FavoriteResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Favorite service
pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    /// Create a new FavoriteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Favorite (`desired = true`) or unfavorite a tool
    #[instrument(skip(self))]
    pub async fn set_favorite(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        desired: bool,
    ) -> ServiceResult<FavoriteResponse> {
        let repo = self.ctx.favorite_repo();

        let changed = if desired {
            let record = FavoriteRecord::new(user_id.clone(), tool_id.clone(), self.ctx.now());
            repo.insert(&record).await?
        } else {
            repo.delete(user_id, tool_id).await?
        };

        if changed {
            info!(user_id = %user_id, tool_id = %tool_id, favorited = desired, "Favorite updated");
        }

        Ok(FavoriteResponse { favorited: desired })
    }

    /// Whether the viewer favorited the tool; anonymous viewers never have
    pub async fn is_favorited(
        &self,
        viewer: Option<&UserId>,
        tool_id: &ToolId,
    ) -> ServiceResult<FavoriteResponse> {
        let favorited = match viewer {
            Some(user_id) => self.ctx.favorite_repo().exists(user_id, tool_id).await?,
            None => false,
        };
        Ok(FavoriteResponse { favorited })
    }

    /// The subset of `tool_ids` the user favorited, in one query
    pub async fn favorited_batch(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
    ) -> ServiceResult<HashSet<ToolId>> {
        Ok(self
            .ctx
            .favorite_repo()
            .favorited_tools(user_id, tool_ids)
            .await?)
    }

    /// The user's favorites, newest first
    #[instrument(skip(self))]
    pub async fn list_favorites(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> ServiceResult<FavoriteListResponse> {
        let records = self.ctx.favorite_repo().find_by_user(user_id, limit).await?;
        Ok(FavoriteListResponse {
            favorites: records.into_iter().map(FavoriteEntry::from).collect(),
        })
    }
}
