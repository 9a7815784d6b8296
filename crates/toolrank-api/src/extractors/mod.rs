//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path parameters.

mod auth;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser};
pub use path::ToolIdPath;
pub use validated::{OptionalValidatedJson, ValidatedJson, ValidatedQuery};
