//! Integration test utilities for the ranking server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API with the in-memory storage backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
