//! Discovery candidates

use super::User;

/// A profile eligible for discovery, with its attractiveness score.
///
/// The score is the number of users who have swiped yes on this profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub user: User,
    pub attractiveness: i64,
}

/// A candidate after distance to the requester has been computed
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub user: User,
    pub distance_km: f64,
    pub attractiveness: i64,
}
