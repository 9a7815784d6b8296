//! Authentication utilities
//!
//! Users sign in with the external auth provider; this service only verifies
//! the bearer tokens that provider issues.

mod jwt;

pub use jwt::{AppMetadata, Claims, JwtService};
