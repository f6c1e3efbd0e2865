//! User database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the users table, without the password column
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A discovery row: a user plus the count of yes-swipes they received
#[derive(Debug, Clone, FromRow)]
pub struct CandidateModel {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub attractiveness_score: i64,
}
