//! Domain entity to response DTO conversions

use chrono::{DateTime, Utc};
use toolrank_core::entities::{FavoriteRecord, QuotaUsage, ToolTally};
use toolrank_core::value_objects::{days_until_month_reset, next_month_start, DayWindow};

use super::responses::{FavoriteEntry, QuotaResponse, RankingEntry};

impl From<FavoriteRecord> for FavoriteEntry {
    fn from(record: FavoriteRecord) -> Self {
        Self {
            tool_id: record.tool_id.into_inner(),
            favorited_at: record.created_at,
        }
    }
}

impl RankingEntry {
    /// Leaderboard row; `rank` is 1-based
    pub fn from_tally(rank: usize, tally: ToolTally) -> Self {
        Self {
            rank,
            tool_id: tally.tool_id.into_inner(),
            upvote_count: tally.upvote_count,
        }
    }
}

impl QuotaResponse {
    /// Quota snapshot with both reset timers measured from `now`
    pub fn from_usage(usage: QuotaUsage, now: DateTime<Utc>) -> Self {
        let today = DayWindow::containing(now);
        Self {
            limit: usage.limit,
            used: usage.used,
            remaining: usage.remaining(),
            daily_reset_at: today.end,
            seconds_until_daily_reset: today.remaining_from(now).num_seconds(),
            monthly_reset_at: next_month_start(now),
            days_until_monthly_reset: days_until_month_reset(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_quota_response_timers() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap();
        let response = QuotaResponse::from_usage(QuotaUsage::new(3, 2), now);

        assert_eq!(response.remaining, 1);
        assert_eq!(
            response.daily_reset_at,
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(response.seconds_until_daily_reset, 3600);
        assert_eq!(
            response.monthly_reset_at,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert_eq!(response.days_until_monthly_reset, 1);
    }
}
