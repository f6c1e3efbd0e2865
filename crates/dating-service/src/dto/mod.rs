//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateUserRequest, DiscoverQuery, LoginRequest, Preference, SwipeRequest,
    DATE_OF_BIRTH_FORMAT, MAX_FILTER_AGE,
};

pub use responses::{
    DiscoveryResponse, HealthChecks, MatchResponse, PublicUserResponse,
    ReadinessResponse, TokenResponse, UserResponse,
};
