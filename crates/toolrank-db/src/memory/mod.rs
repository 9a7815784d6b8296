//! In-process storage backend
//!
//! Implements the same repository traits and constraints as the PostgreSQL
//! repositories without a database. Selected with `STORAGE_BACKEND=memory`;
//! state is lost on restart.

mod favorite;
mod upvote;

pub use favorite::MemoryFavoriteRepository;
pub use upvote::MemoryUpvoteRepository;
