//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use toolrank_common::JwtService;
use toolrank_core::{FixedClock, ToolId, UserId};
use toolrank_db::{MemoryFavoriteRepository, MemoryUpvoteRepository};

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) struct Harness {
    pub ctx: ServiceContext,
    pub clock: Arc<FixedClock>,
    pub upvotes: Arc<MemoryUpvoteRepository>,
    pub favorites: Arc<MemoryFavoriteRepository>,
}

impl Harness {
    pub fn at(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(FixedClock::new(now));
        let upvotes = Arc::new(MemoryUpvoteRepository::new());
        let favorites = Arc::new(MemoryFavoriteRepository::new());
        let ctx = ServiceContextBuilder::new()
            .upvote_repo(upvotes.clone())
            .favorite_repo(favorites.clone())
            .clock(clock.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", None)))
            .build()
            .unwrap();

        Self {
            ctx,
            clock,
            upvotes,
            favorites,
        }
    }
}

pub(crate) fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub(crate) fn user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

pub(crate) fn tool(id: &str) -> ToolId {
    ToolId::parse(id).unwrap()
}
