//! # toolrank-service
//!
//! Application layer containing the ranking engine's use cases and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    DailyQuotaGuard, FavoriteService, MaintenanceService, RankingService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UpvoteService,
};
