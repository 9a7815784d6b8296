//! # toolrank-core
//!
//! Domain layer for the tool directory's ranking engine: upvote and favorite
//! entities, identity value objects, UTC time windows, the clock seam, and the
//! repository traits implemented by the storage layer.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::{
    FavoriteRecord, QuotaUsage, ToolTally, UpvoteRecord, DEFAULT_DAILY_UPVOTE_LIMIT,
};
pub use error::DomainError;
pub use traits::{FavoriteRepository, RepoResult, UpvoteRepository};
pub use value_objects::{
    day_end, day_start, days_until_month_reset, month_start, next_month_start, DayWindow,
    IdParseError, RecordId, ToolId, UserId,
};
