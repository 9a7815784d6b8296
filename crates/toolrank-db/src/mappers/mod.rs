//! Entity to model mappers
//!
//! Conversions between domain entities (toolrank-core) and database models.
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects
//! - `*Insert` structs: borrow entity data for database writes

mod favorite;
mod upvote;

pub(crate) use upvote::parse_tool_id;
pub use upvote::{tool_id_strings, UpvoteInsert};
