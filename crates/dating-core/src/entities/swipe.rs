//! Swipe entity - one user's yes/no decision about another

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// The latest decision of `user_id` about `swiped_user_id`.
///
/// There is at most one swipe per ordered pair; re-swiping overwrites
/// `interested` and keeps the original `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swipe {
    pub user_id: UserId,
    pub swiped_user_id: UserId,
    pub interested: bool,
    pub created_at: DateTime<Utc>,
}
