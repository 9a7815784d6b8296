//! Service context - dependency container for services
//!
//! Holds the repositories, the clock and the policy values needed by services.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use toolrank_common::JwtService;
use toolrank_core::traits::{FavoriteRepository, UpvoteRepository};
use toolrank_core::{Clock, SystemClock, DEFAULT_DAILY_UPVOTE_LIMIT};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Upvote and favorite repositories
/// - The clock every time window is computed from
/// - JWT service for authentication
/// - The daily upvote limit
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    upvote_repo: Arc<dyn UpvoteRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,

    // Services
    clock: Arc<dyn Clock>,
    jwt_service: Arc<JwtService>,

    // Policy
    daily_limit: u32,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        upvote_repo: Arc<dyn UpvoteRepository>,
        favorite_repo: Arc<dyn FavoriteRepository>,
        clock: Arc<dyn Clock>,
        jwt_service: Arc<JwtService>,
        daily_limit: u32,
    ) -> Self {
        Self {
            upvote_repo,
            favorite_repo,
            clock,
            jwt_service,
            daily_limit,
        }
    }

    // === Repositories ===

    /// Get the upvote repository
    pub fn upvote_repo(&self) -> &dyn UpvoteRepository {
        self.upvote_repo.as_ref()
    }

    /// Get the favorite repository
    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Current instant according to the configured clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Maximum distinct-tool upvotes per user per UTC day
    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("daily_limit", &self.daily_limit)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    upvote_repo: Option<Arc<dyn UpvoteRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
    daily_limit: u32,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            upvote_repo: None,
            favorite_repo: None,
            clock: None,
            jwt_service: None,
            daily_limit: DEFAULT_DAILY_UPVOTE_LIMIT,
        }
    }

    pub fn upvote_repo(mut self, repo: Arc<dyn UpvoteRepository>) -> Self {
        self.upvote_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    /// Defaults to the wall clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    /// or the daily limit is zero
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.daily_limit == 0 {
            return Err(ServiceError::validation("daily_limit must be at least 1"));
        }

        Ok(ServiceContext::new(
            self.upvote_repo
                .ok_or_else(|| ServiceError::validation("upvote_repo is required"))?,
            self.favorite_repo
                .ok_or_else(|| ServiceError::validation("favorite_repo is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.daily_limit,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolrank_db::{MemoryFavoriteRepository, MemoryUpvoteRepository};

    #[test]
    fn test_builder_requires_repositories() {
        let result = ServiceContextBuilder::new()
            .jwt_service(Arc::new(JwtService::new("secret", None)))
            .build();
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn test_builder_rejects_zero_limit() {
        let result = ServiceContextBuilder::new()
            .upvote_repo(Arc::new(MemoryUpvoteRepository::new()))
            .favorite_repo(Arc::new(MemoryFavoriteRepository::new()))
            .jwt_service(Arc::new(JwtService::new("secret", None)))
            .daily_limit(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ServiceContextBuilder::new()
            .upvote_repo(Arc::new(MemoryUpvoteRepository::new()))
            .favorite_repo(Arc::new(MemoryFavoriteRepository::new()))
            .jwt_service(Arc::new(JwtService::new("secret", None)))
            .build()
            .unwrap();
        assert_eq!(ctx.daily_limit(), 3);
        assert!(ctx.now() <= Utc::now());
    }
}
