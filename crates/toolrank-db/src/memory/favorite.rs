//! In-process implementation of FavoriteRepository

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::instrument;

use toolrank_core::entities::FavoriteRecord;
use toolrank_core::error::DomainError;
use toolrank_core::traits::{FavoriteRepository, RepoResult};
use toolrank_core::value_objects::{ToolId, UserId};

/// Favorites held in process memory, unique per `(user, tool)`
#[derive(Debug, Default)]
pub struct MemoryFavoriteRepository {
    rows: Mutex<Vec<FavoriteRecord>>,
    unavailable: AtomicBool,
}

impl MemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `StorageUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn stored_len(&self) -> usize {
        self.rows.lock().len()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StorageUnavailable(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryFavoriteRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id, tool_id = %record.tool_id))]
    async fn insert(&self, record: &FavoriteRecord) -> RepoResult<bool> {
        self.check_available()?;
        let mut rows = self.rows.lock();
        if rows.iter().any(|r| r.matches(&record.user_id, &record.tool_id)) {
            return Ok(false);
        }
        rows.push(record.clone());
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool> {
        self.check_available()?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| !r.matches(user_id, tool_id));
        Ok(rows.len() < before)
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: &UserId, tool_id: &ToolId) -> RepoResult<bool> {
        self.check_available()?;
        Ok(self.rows.lock().iter().any(|r| r.matches(user_id, tool_id)))
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn favorited_tools(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
    ) -> RepoResult<HashSet<ToolId>> {
        self.check_available()?;
        let wanted: HashSet<&ToolId> = tool_ids.iter().collect();
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.user_id == user_id && wanted.contains(&r.tool_id))
            .map(|r| r.tool_id.clone())
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<FavoriteRecord>> {
        self.check_available()?;
        let limit = limit.clamp(1, 100) as usize;
        let mut mine: Vec<FavoriteRecord> = self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.tool_id.cmp(&b.tool_id))
        });
        mine.truncate(limit);
        Ok(mine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user() -> UserId {
        UserId::parse("u1").unwrap()
    }

    fn tool(id: &str) -> ToolId {
        ToolId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn test_insert_is_unique_per_pair() {
        let repo = MemoryFavoriteRepository::new();
        let now = Utc::now();

        assert!(repo.insert(&FavoriteRecord::new(user(), tool("t1"), now)).await.unwrap());
        assert!(!repo.insert(&FavoriteRecord::new(user(), tool("t1"), now)).await.unwrap());
        assert_eq!(repo.stored_len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_false() {
        let repo = MemoryFavoriteRepository::new();
        assert!(!repo.delete(&user(), &tool("t1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_user_newest_first() {
        let repo = MemoryFavoriteRepository::new();
        let now = Utc::now();
        repo.insert(&FavoriteRecord::new(user(), tool("old"), now - Duration::hours(1)))
            .await
            .unwrap();
        repo.insert(&FavoriteRecord::new(user(), tool("new"), now))
            .await
            .unwrap();
        repo.insert(&FavoriteRecord::new(UserId::parse("u2").unwrap(), tool("other"), now))
            .await
            .unwrap();

        let favorites = repo.find_by_user(&user(), 10).await.unwrap();
        let ids: Vec<&str> = favorites.iter().map(|f| f.tool_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let favorited = repo
            .favorited_tools(&user(), &[tool("old"), tool("other")])
            .await
            .unwrap();
        assert_eq!(favorited, HashSet::from([tool("old")]));
    }
}
