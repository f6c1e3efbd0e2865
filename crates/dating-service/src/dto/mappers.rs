//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Ages are computed as of the current UTC date.

use dating_core::{MatchResult, ScoredCandidate, User};

use super::responses::{DiscoveryResponse, MatchResponse, PublicUserResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            gender: user.gender,
            age: user.age(),
            location_lat: user.location.map(|l| l.latitude),
            location_long: user.location.map(|l| l.longitude),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            gender: user.gender,
            age: user.age(),
            location_lat: user.location.map(|l| l.latitude),
            location_long: user.location.map(|l| l.longitude),
        }
    }
}

// ============================================================================
// Swipe / Discovery Mappers
// ============================================================================

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            match_id: result.match_id,
            matched: result.matched,
        }
    }
}

impl From<ScoredCandidate> for DiscoveryResponse {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            user: PublicUserResponse::from(&candidate.user),
            distance: candidate.distance_km,
            attractiveness: candidate.attractiveness,
        }
    }
}
