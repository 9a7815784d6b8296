//! UTC time windows
//!
//! Every upvote carries two time dimensions: the calendar day it was cast on
//! (bounds the daily cap and the one-vote-per-tool-per-day rule) and the month
//! bucket it counts towards (bounds the visible count). Both are computed here
//! in UTC, never in server-local time.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};

/// UTC midnight at the start of `now`'s calendar day
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// UTC midnight at the start of the following day (exclusive upper bound)
pub fn day_end(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) + Duration::days(1)
}

/// First day of `now`'s month; the value stored as an upvote's bucket tag
pub fn month_start(now: DateTime<Utc>) -> NaiveDate {
    let date = now.date_naive();
    date - Days::new(u64::from(date.day0()))
}

/// First day of the month after `now`'s month
pub fn next_month_start(now: DateTime<Utc>) -> NaiveDate {
    month_start(now) + Months::new(1)
}

/// Whole days (rounded up) until the next month bucket opens
pub fn days_until_month_reset(now: DateTime<Utc>) -> i64 {
    let reset = next_month_start(now).and_time(NaiveTime::MIN).and_utc();
    let remaining = reset - now;
    let whole = remaining.num_days();
    if remaining > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}

/// Half-open `[start, end)` interval covering one UTC calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The day window containing `now`
    pub fn containing(now: DateTime<Utc>) -> Self {
        Self {
            start: day_start(now),
            end: day_end(now),
        }
    }

    /// Calendar date of this window
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Check if an instant falls inside the window
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Time left until the window closes, measured from `now`
    pub fn remaining_from(&self, now: DateTime<Utc>) -> Duration {
        (self.end - now).max(Duration::zero())
    }
}
