//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod favorites;
pub mod health;
pub mod tools;
pub mod upvotes;
pub mod users;
