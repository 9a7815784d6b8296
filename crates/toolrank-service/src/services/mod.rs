//! Business logic services
//!
//! This module contains the service layer: the upvote ledger operations, the
//! daily quota guard, favorites, rankings and the storage maintenance job.

pub mod context;
pub mod error;
pub mod favorite;
pub mod maintenance;
pub mod quota;
pub mod ranking;
pub mod upvote;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use maintenance::MaintenanceService;
pub use quota::DailyQuotaGuard;
pub use ranking::RankingService;
pub use upvote::UpvoteService;
