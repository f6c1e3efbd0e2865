//! # dating-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] that owns the stores, so the same
//! code runs against PostgreSQL/Redis in production and against the
//! in-memory fakes in [`testing`] under test.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use services::{
    AuthService, AuthenticatedUser, DiscoveryService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, SwipeService, UserService,
};
