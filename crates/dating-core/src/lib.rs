//! # dating-core
//!
//! Domain layer containing entities, value objects, the geo/score ranking
//! functions, and the store traits (ports) used by the service layer.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod ranking;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Candidate, Match, MatchResult, NewUser, ScoredCandidate, Swipe, User};
pub use error::DomainError;
pub use traits::{
    CandidateFilter, MatchStore, RepoResult, SessionStore, SwipeStore, SwipeUnitOfWork,
    UnitOfWorkFactory, UserStore,
};
pub use value_objects::{
    age_on, AgeRange, BirthDateWindow, Gender, GenderParseError, Location, UserId,
    UserIdParseError,
};
