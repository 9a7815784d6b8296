//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    clamp_limit, LimitQuery, PurgeRequest, StandingsQuery, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
    MAX_STANDINGS_IDS,
};

pub use responses::{
    FavoriteEntry, FavoriteListResponse, FavoriteResponse, HealthChecks, HealthResponse,
    PurgeResponse, QuotaResponse, RankingEntry, RankingsResponse, ReadinessResponse,
    StandingsResponse, ToolStandingResponse, UpvoteResponse,
};
