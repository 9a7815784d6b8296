//! # toolrank-db
//!
//! Storage layer implementing the toolrank-core repository traits.
//!
//! ## Overview
//!
//! - Connection pool management and embedded SQLx migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repositories
//! - An in-process backend with the same constraints, for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toolrank_db::{create_pool, run_migrations, DatabaseConfig, PgUpvoteRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::default();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let upvote_repo = PgUpvoteRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryFavoriteRepository, MemoryUpvoteRepository};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgFavoriteRepository, PgUpvoteRepository};
