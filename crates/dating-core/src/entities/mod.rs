//! Domain entities - core business objects

mod candidate;
mod matching;
mod swipe;
mod user;

pub use candidate::{Candidate, ScoredCandidate};
pub use matching::{Match, MatchResult};
pub use swipe::Swipe;
pub use user::{NewUser, User};
