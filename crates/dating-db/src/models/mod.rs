//! Database models - SQLx-compatible structs for PostgreSQL tables

mod matching;
mod swipe;
mod user;

pub use matching::MatchModel;
pub use swipe::SwipeModel;
pub use user::{CandidateModel, UserModel};
