//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in toolrank-core.

mod error;
mod favorite;
mod upvote;

pub use error::{map_db_error, map_unique_violation};
pub use favorite::PgFavoriteRepository;
pub use upvote::PgUpvoteRepository;
