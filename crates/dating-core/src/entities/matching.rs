//! Match entity - two users who both swiped yes on each other

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// A mutual match, stored once per unordered pair with `user1_id < user2_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Check whether `user_id` is one side of this match
    pub fn involves(&self, user_id: UserId) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    /// The other side of the match, if `user_id` is part of it
    pub fn partner_of(&self, user_id: UserId) -> Option<UserId> {
        if self.user1_id == user_id {
            Some(self.user2_id)
        } else if self.user2_id == user_id {
            Some(self.user1_id)
        } else {
            None
        }
    }
}

/// Outcome of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    pub match_id: Option<i64>,
}

impl MatchResult {
    pub const NO_MATCH: Self = Self {
        matched: false,
        match_id: None,
    };

    pub const fn matched(match_id: i64) -> Self {
        Self {
            matched: true,
            match_id: Some(match_id),
        }
    }
}
