//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use dating_core::{Gender, UserId};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// A registered profile as returned to its owner. Never carries the password.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_long: Option<f64>,
}

/// A profile as shown to other users
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: UserId,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_long: Option<f64>,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Issued access token
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    /// Expiry as a unix timestamp in seconds
    pub expires: i64,
}

// ============================================================================
// Swipe Responses
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<i64>,
    pub matched: bool,
}

// ============================================================================
// Discovery Responses
// ============================================================================

/// One ranked discovery entry
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResponse {
    pub user: PublicUserResponse,
    /// Great-circle distance from the requester in kilometres
    pub distance: f64,
    /// Number of yes swipes the profile has received
    pub attractiveness: i64,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
