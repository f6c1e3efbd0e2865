//! Store traits (ports) implemented by the infrastructure crates

mod stores;

pub use stores::{
    CandidateFilter, MatchStore, RepoResult, SessionStore, SwipeStore, SwipeUnitOfWork,
    UnitOfWorkFactory, UserStore,
};
