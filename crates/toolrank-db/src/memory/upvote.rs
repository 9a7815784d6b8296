//! In-process implementation of UpvoteRepository

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use toolrank_core::entities::{ToolTally, UpvoteRecord};
use toolrank_core::error::DomainError;
use toolrank_core::traits::{RepoResult, UpvoteRepository};
use toolrank_core::value_objects::{DayWindow, ToolId, UserId};

/// Upvote ledger held in process memory
///
/// All rows sit behind one lock; `insert_within_quota` checks and inserts
/// while holding it, which gives the same atomicity as the PostgreSQL
/// transaction.
#[derive(Debug, Default)]
pub struct MemoryUpvoteRepository {
    rows: Mutex<Vec<UpvoteRecord>>,
    unavailable: AtomicBool,
}

impl MemoryUpvoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `StorageUnavailable` until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of physically stored rows, visible or not
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
impl UpvoteRepository for MemoryUpvoteRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id, tool_id = %record.tool_id))]
    async fn insert_within_quota(
        &self,
        record: &UpvoteRecord,
        daily_limit: u32,
    ) -> RepoResult<()> {
        self.check_available()?;
        let date = record.upvote_date();
        let mut rows = self.rows.lock();

        let mut used: u32 = 0;
        for row in rows.iter().filter(|r| r.user_id == record.user_id && r.upvote_date() == date) {
            if row.tool_id == record.tool_id {
                debug!("Upvote rejected: pair already voted today");
                return Err(DomainError::DuplicateVote);
            }
            used += 1;
        }

        if used >= daily_limit {
            debug!(used, daily_limit, "Upvote rejected: daily limit reached");
            return Err(DomainError::DailyLimitReached {
                limit: daily_limit,
                used,
            });
        }

        rows.push(record.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<u64> {
        self.check_available()?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| !(&r.user_id == user_id && &r.tool_id == tool_id && r.is_within(&window)));
        Ok((before - rows.len()) as u64)
    }

    #[instrument(skip(self))]
    async fn exists_in_window(
        &self,
        user_id: &UserId,
        tool_id: &ToolId,
        window: DayWindow,
    ) -> RepoResult<bool> {
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|r| &r.user_id == user_id && &r.tool_id == tool_id && r.is_within(&window)))
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn voted_tools_in_window(
        &self,
        user_id: &UserId,
        tool_ids: &[ToolId],
        window: DayWindow,
    ) -> RepoResult<HashSet<ToolId>> {
        self.check_available()?;
        let wanted: HashSet<&ToolId> = tool_ids.iter().collect();
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.user_id == user_id && r.is_within(&window) && wanted.contains(&r.tool_id))
            .map(|r| r.tool_id.clone())
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_by_user_in_window(
        &self,
        user_id: &UserId,
        window: DayWindow,
    ) -> RepoResult<i64> {
        self.check_available()?;
        let count = self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.user_id == user_id && r.is_within(&window))
            .count();
        Ok(count as i64)
    }

    #[instrument(skip(self))]
    async fn count_for_tool(&self, tool_id: &ToolId, month: NaiveDate) -> RepoResult<i64> {
        self.check_available()?;
        let count = self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.tool_id == tool_id && r.counts_in_month(month))
            .count();
        Ok(count as i64)
    }

    #[instrument(skip(self, tool_ids), fields(tools = tool_ids.len()))]
    async fn count_for_tools(
        &self,
        tool_ids: &[ToolId],
        month: NaiveDate,
    ) -> RepoResult<HashMap<ToolId, i64>> {
        self.check_available()?;
        let wanted: HashSet<&ToolId> = tool_ids.iter().collect();
        let mut counts = HashMap::new();
        for row in self.rows.lock().iter() {
            if row.counts_in_month(month) && wanted.contains(&row.tool_id) {
                *counts.entry(row.tool_id.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    async fn top_tools(&self, month: NaiveDate, limit: i64) -> RepoResult<Vec<ToolTally>> {
        self.check_available()?;
        let limit = limit.clamp(1, 100) as usize;

        let mut counts: HashMap<ToolId, i64> = HashMap::new();
        for row in self.rows.lock().iter().filter(|r| r.counts_in_month(month)) {
            *counts.entry(row.tool_id.clone()).or_insert(0) += 1;
        }

        let mut tallies: Vec<ToolTally> = counts
            .into_iter()
            .map(|(tool_id, count)| ToolTally::new(tool_id, count))
            .collect();
        tallies.sort_by(|a, b| {
            b.upvote_count
                .cmp(&a.upvote_count)
                .then_with(|| a.tool_id.cmp(&b.tool_id))
        });
        tallies.truncate(limit);
        Ok(tallies)
    }

    #[instrument(skip(self))]
    async fn delete_before_month(&self, month: NaiveDate) -> RepoResult<u64> {
        self.check_available()?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.monthly_reset_date >= month);
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_available()
    }
}
