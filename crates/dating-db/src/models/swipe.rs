//! Swipe database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the user_swipes table
#[derive(Debug, Clone, FromRow)]
pub struct SwipeModel {
    pub user_id: i64,
    pub swiped_user_id: i64,
    pub swipe_status: bool,
    pub created_at: DateTime<Utc>,
}
