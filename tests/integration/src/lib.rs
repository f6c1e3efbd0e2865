//! Integration test utilities for the dating API
//!
//! This crate provides helpers for running end-to-end tests against
//! a real server backed by PostgreSQL and Redis.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
