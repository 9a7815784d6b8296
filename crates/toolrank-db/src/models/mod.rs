//! Database models with SQLx `FromRow` derives
//!
//! These mirror table rows one-to-one. Conversion into domain entities lives in
//! [`crate::mappers`].

mod favorite;
mod upvote;

pub use favorite::FavoriteModel;
pub use upvote::{ToolCountModel, UpvoteModel};
