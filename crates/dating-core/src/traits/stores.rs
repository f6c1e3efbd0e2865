//! Store traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Swipe and match writes happen through a
//! [`SwipeUnitOfWork`], which scopes them to a single transaction.

use async_trait::async_trait;

use crate::entities::{Candidate, Match, NewUser, Swipe, User};
use crate::error::DomainError;
use crate::value_objects::{BirthDateWindow, Gender, UserId};

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Store
// ============================================================================

/// Filters applied by the discovery query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    pub gender: Option<Gender>,
    pub birth_dates: Option<BirthDateWindow>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Users eligible for discovery by `requester`, with attractiveness scores.
    ///
    /// Excludes the requester, users matched with the requester, and users the
    /// requester has swiped. The result is unordered.
    async fn find_candidates(
        &self,
        requester: UserId,
        filter: &CandidateFilter,
    ) -> RepoResult<Vec<Candidate>>;
}

// ============================================================================
// Swipe / Match Stores (transaction scoped)
// ============================================================================

#[async_trait]
pub trait SwipeStore: Send {
    /// Serialise swipe handling for the unordered pair `{a, b}` until the
    /// enclosing unit of work ends
    async fn lock_pair(&mut self, a: UserId, b: UserId) -> RepoResult<()>;

    /// Insert or overwrite the swipe of `actor` on `target`
    async fn upsert_swipe(
        &mut self,
        actor: UserId,
        target: UserId,
        interested: bool,
    ) -> RepoResult<Swipe>;

    /// Number of interested swipes among `(a, b)` and `(b, a)`
    async fn count_interested_between(&mut self, a: UserId, b: UserId) -> RepoResult<i64>;
}

#[async_trait]
pub trait MatchStore: Send {
    /// Create the match for `{a, b}` unless one already exists.
    ///
    /// Returns `None` when the pair was already matched.
    async fn insert_match_if_absent(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>>;

    /// Find the match for `{a, b}` in either order
    async fn find_match(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>>;
}

/// A transaction spanning swipe and match writes.
///
/// Dropping a unit of work without calling [`commit`](Self::commit) discards
/// every write made through it.
#[async_trait]
pub trait SwipeUnitOfWork: SwipeStore + MatchStore {
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// Open a new unit of work
    async fn begin(&self) -> RepoResult<Box<dyn SwipeUnitOfWork>>;
}

// ============================================================================
// Session Store
// ============================================================================

/// Tracks issued access tokens so they can be revoked before they expire
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record an issued session for `ttl_seconds`
    async fn record(&self, session_id: &str, user_id: UserId, ttl_seconds: u64) -> RepoResult<()>;

    /// Check that the session exists and belongs to `user_id`
    async fn is_active(&self, session_id: &str, user_id: UserId) -> RepoResult<bool>;

    /// Revoke a session
    async fn revoke(&self, session_id: &str) -> RepoResult<()>;
}
