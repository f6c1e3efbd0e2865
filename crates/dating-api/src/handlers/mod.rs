//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod discovery;
pub mod health;
pub mod swipes;
pub mod users;
