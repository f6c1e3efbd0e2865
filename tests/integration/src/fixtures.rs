//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique email so runs against a shared database never collide
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}_{}@example.com", Uuid::new_v4().simple())
}

/// Profile registration request
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub gender: String,
    pub dob: String,
    #[serde(rename = "locationLat", skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(rename = "locationLong", skip_serializing_if = "Option::is_none")]
    pub location_long: Option<f64>,
}

impl CreateUserRequest {
    pub fn unique(gender: &str) -> Self {
        Self {
            email: unique_email("test"),
            password: "TestPass123!".to_string(),
            name: "Test User".to_string(),
            gender: gender.to_string(),
            dob: "1995-05-05".to_string(),
            location_lat: None,
            location_long: None,
        }
    }

    pub fn at(mut self, lat: f64, long: f64) -> Self {
        self.location_lat = Some(lat);
        self.location_long = Some(long);
        self
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_create(request: &CreateUserRequest) -> Self {
        Self {
            email: request.email.clone(),
            password: request.password.clone(),
        }
    }
}

/// Swipe request
#[derive(Debug, Serialize)]
pub struct SwipeRequest {
    pub user_id: i64,
    pub preference: String,
}

impl SwipeRequest {
    pub fn yes(user_id: i64) -> Self {
        Self {
            user_id,
            preference: "yes".to_string(),
        }
    }

    pub fn no(user_id: i64) -> Self {
        Self {
            user_id,
            preference: "no".to_string(),
        }
    }
}

/// Profile response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: Option<String>,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires: i64,
}

/// Swipe outcome
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    pub matched: bool,
    pub match_id: Option<i64>,
}

/// Ranked discovery entry
#[derive(Debug, Deserialize)]
pub struct DiscoveryResponse {
    pub user: UserResponse,
    pub distance: f64,
    pub attractiveness: i64,
}
