//! Domain entities - core business objects

mod favorite;
mod upvote;

pub use favorite::FavoriteRecord;
pub use upvote::{QuotaUsage, ToolTally, UpvoteRecord, DEFAULT_DAILY_UPVOTE_LIMIT};
