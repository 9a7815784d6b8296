//! Repository traits (ports)

mod repositories;

pub use repositories::{FavoriteRepository, RepoResult, UpvoteRepository};
