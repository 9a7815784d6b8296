//! PostgreSQL implementation of FavoriteRepository

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use toolrank_core::entities::FavoriteRecord;
use toolrank_core::traits::{FavoriteRepository, RepoResult};
use toolrank_core::value_objects::{ToolId, UserId};

use crate::mappers::{parse_tool_id, tool_id_strings};
use crate::models::FavoriteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    /// Create a new PgFavoriteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id, tool_id = %record.tool_id))]
    async fn insert(&self, record: &FavoriteRecord) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (id, user_id, tool_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, tool_id) DO NOTHING
            "#,
        )
        .bind(record.id.into_inner())
        .bind(record.user_id.as_str())
        .bind(record.tool_id.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites WHERE user_id = $1 AND tool_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM favorites WHERE user_id = $1 AND tool_id = $2
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn favorited_tools(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
    ) -> RepoResult<HashSet<ToolId>> {
        if tool_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT tool_id FROM favorites
            WHERE user_id = $1 AND tool_id = ANY($2)
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id_strings(tool_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(parse_tool_id).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<FavoriteRecord>> {
        let limit = limit.clamp(1, 100);

        let rows = sqlx::query_as::<_, FavoriteModel>(
            r#"
            SELECT id, user_id, tool_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC, tool_id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(FavoriteRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFavoriteRepository>();
    }
}
