//! PostgreSQL implementation of UpvoteRepository

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use toolrank_core::entities::{ToolTally, UpvoteRecord};
use toolrank_core::error::DomainError;
use toolrank_core::traits::{RepoResult, UpvoteRepository};
use toolrank_core::value_objects::{DayWindow, ToolId, UserId};

use crate::mappers::{parse_tool_id, tool_id_strings, UpvoteInsert};
use crate::models::ToolCountModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UpvoteRepository
#[derive(Clone)]
pub struct PgUpvoteRepository {
    pool: PgPool,
}

impl PgUpvoteRepository {
    /// Create a new PgUpvoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UpvoteRepository for PgUpvoteRepository {
    /// Runs in one transaction serialized per user by an advisory lock, so the
    /// cap count and the insert observe the same state. The unique constraint
    /// on `(user_id, tool_id, upvote_date)` backs the per-tool rule even for
    /// writers that bypass this method. Dropping the future before commit
    /// rolls the transaction back.
    #[instrument(skip(self, record), fields(user_id = %record.user_id, tool_id = %record.tool_id))]
    async fn insert_within_quota(
        &self,
        record: &UpvoteRecord,
        daily_limit: u32,
    ) -> RepoResult<()> {
        let insert = UpvoteInsert::new(record);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(insert.user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let already_voted = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM upvotes
                WHERE user_id = $1 AND tool_id = $2 AND upvote_date = $3
            )
            "#,
        )
        .bind(insert.user_id)
        .bind(insert.tool_id)
        .bind(insert.upvote_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_voted {
            debug!("Upvote rejected: pair already voted today");
            return Err(DomainError::DuplicateVote);
        }

        let used = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM upvotes
            WHERE user_id = $1 AND upvote_date = $2
            "#,
        )
        .bind(insert.user_id)
        .bind(insert.upvote_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if used >= i64::from(daily_limit) {
            debug!(used, daily_limit, "Upvote rejected: daily limit reached");
            return Err(DomainError::DailyLimitReached {
                limit: daily_limit,
                used: u32::try_from(used).unwrap_or(u32::MAX),
            });
        }

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO upvotes (id, user_id, tool_id, upvoted_at, upvote_date, monthly_reset_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, tool_id, upvote_date) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.tool_id)
        .bind(insert.upvoted_at)
        .bind(insert.upvote_date)
        .bind(insert.monthly_reset_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateVote))?;

        if inserted.is_none() {
            return Err(DomainError::DuplicateVote);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM upvotes
            WHERE user_id = $1 AND tool_id = $2
              AND upvoted_at >= $3 AND upvoted_at < $4
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id.as_str())
        .bind(window.start)
        .bind(window.end)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn exists_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM upvotes
                WHERE user_id = $1 AND tool_id = $2
                  AND upvoted_at >= $3 AND upvoted_at < $4
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn voted_tools_in_window(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
        window: DayWindow,
    ) -> RepoResult<HashSet<ToolId>> {
        if tool_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT tool_id FROM upvotes
            WHERE user_id = $1 AND tool_id = ANY($2)
              AND upvoted_at >= $3 AND upvoted_at < $4
            "#,
        )
        .bind(user_id.as_str())
        .bind(tool_id_strings(tool_ids))
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(parse_tool_id).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_user_in_window(
        &self,
        user_id: &UserId,
        window: DayWindow,
    ) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM upvotes
            WHERE user_id = $1 AND upvoted_at >= $2 AND upvoted_at < $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_for_tool(&self, tool_id: &ToolId, month: NaiveDate) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM upvotes
            WHERE tool_id = $1 AND monthly_reset_date = $2
            "#,
        )
        .bind(tool_id.as_str())
        .bind(month)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn count_for_tools(
        &self,
        tool_ids: &[ToolId],
        month: NaiveDate,
    ) -> RepoResult<HashMap<ToolId, i64>> {
        if tool_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ToolCountModel>(
            r#"
            SELECT tool_id, COUNT(*) AS count
            FROM upvotes
            WHERE tool_id = ANY($1) AND monthly_reset_date = $2
            GROUP BY tool_id
            "#,
        )
        .bind(tool_id_strings(tool_ids))
        .bind(month)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| ToolTally::try_from(row).map(|t| (t.tool_id, t.upvote_count)))
            .collect()
    }

    #[instrument(skip(self))]
    async fn top_tools(&self, month: NaiveDate, limit: i64) -> RepoResult<Vec<ToolTally>> {
        let limit = limit.clamp(1, 100);

        let rows = sqlx::query_as::<_, ToolCountModel>(
            r#"
            SELECT tool_id, COUNT(*) AS count
            FROM upvotes
            WHERE monthly_reset_date = $1
            GROUP BY tool_id
            ORDER BY count DESC, tool_id ASC
            LIMIT $2
            "#,
        )
        .bind(month)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ToolTally::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete_before_month(&self, month: NaiveDate) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM upvotes WHERE monthly_reset_date < $1
            "#,
        )
        .bind(month)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
