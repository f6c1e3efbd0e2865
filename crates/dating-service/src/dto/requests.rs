//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and, where they carry user input that
//! needs checking, `Validate`.

use chrono::{NaiveDate, Utc};
use dating_core::{AgeRange, Gender, UserId};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Date format accepted for `dob`
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Ages above this are clamped when filtering discovery
pub const MAX_FILTER_AGE: u32 = 150;

// ============================================================================
// User Requests
// ============================================================================

/// Profile registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    /// Date of birth, `YYYY-MM-DD`
    #[validate(custom(function = "validate_date_of_birth"))]
    pub dob: String,

    #[serde(rename = "locationLat")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub location_lat: Option<f64>,

    #[serde(rename = "locationLong")]
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub location_long: Option<f64>,
}

impl CreateUserRequest {
    /// Parsed gender, if valid
    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.parse().ok()
    }

    /// Parsed date of birth, if valid
    pub fn parsed_date_of_birth(&self) -> Option<NaiveDate> {
        parse_date_of_birth(&self.dob)
    }
}

fn parse_date_of_birth(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT).ok()
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    if value.parse::<Gender>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("gender").with_message("Gender must be M or F".into()))
    }
}

fn validate_date_of_birth(value: &str) -> Result<(), ValidationError> {
    match parse_date_of_birth(value) {
        Some(dob) if dob <= Utc::now().date_naive() => Ok(()),
        Some(_) => Err(ValidationError::new("dob")
            .with_message("Date of birth cannot be in the future".into())),
        None => Err(ValidationError::new("dob")
            .with_message("Date of birth must be formatted YYYY-MM-DD".into())),
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Swipe Requests
// ============================================================================

/// Yes/no decision on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Yes,
    No,
}

impl Preference {
    pub const fn is_interested(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Swipe on another profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SwipeRequest {
    /// The profile being swiped
    pub user_id: UserId,
    pub preference: Preference,
}

// ============================================================================
// Discovery Requests
// ============================================================================

/// Discovery query string.
///
/// Values are kept as raw strings: a filter that does not parse is dropped
/// rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverQuery {
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub gender: Option<String>,
}

impl DiscoverQuery {
    /// The age filter, applied only when both bounds parse and `min <= max`
    pub fn age_range(&self) -> Option<AgeRange> {
        let min = parse_age(self.min_age.as_deref()?)?;
        let max = parse_age(self.max_age.as_deref()?)?;
        AgeRange::new(min, max)
    }

    /// The gender filter, applied only when it parses
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref()?.trim().parse().ok()
    }
}

fn parse_age(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .map(|age| age.min(MAX_FILTER_AGE))
}
