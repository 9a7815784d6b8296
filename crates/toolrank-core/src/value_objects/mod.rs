//! Value objects - immutable types that represent domain concepts

mod ids;
mod time_window;

pub use ids::{IdParseError, RecordId, ToolId, UserId, MAX_ID_LEN};
pub use time_window::{
    day_end, day_start, days_until_month_reset, month_start, next_month_start, DayWindow,
};
