//! In-memory store fakes
//!
//! [`InMemoryStore`] implements every store trait over shared maps so that
//! services can be exercised without PostgreSQL or Redis. Units of work
//! stage their writes and only apply them on commit; dropping one discards
//! the staged writes. `lock_pair` takes a per-pair async mutex held for the
//! life of the unit of work, mirroring the advisory lock in PostgreSQL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dating_core::traits::{
    CandidateFilter, MatchStore, RepoResult, SessionStore, SwipeStore, SwipeUnitOfWork,
    UnitOfWorkFactory, UserStore,
};
use dating_core::{Candidate, DomainError, Match, NewUser, Swipe, User, UserId};
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Pair = (UserId, UserId);

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    swipes: HashMap<Pair, Swipe>,
    matches: HashMap<Pair, Match>,
    sessions: HashMap<String, UserId>,
    next_user_id: i64,
    next_match_id: i64,
}

impl State {
    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().map(|(u, _)| u).find(|u| u.id == id)
    }
}

/// Shared in-memory implementation of the store traits
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    pair_locks: Arc<Mutex<HashMap<Pair, Arc<AsyncMutex<()>>>>>,
    fail_match_insert: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next match insert fail with a storage error
    pub fn fail_next_match_insert(&self) {
        self.fail_match_insert.store(true, Ordering::SeqCst);
    }

    /// Committed swipe of `actor` on `target`
    pub fn swipe(&self, actor: UserId, target: UserId) -> Option<Swipe> {
        self.state.lock().swipes.get(&(actor, target)).cloned()
    }

    pub fn swipe_count(&self) -> usize {
        self.state.lock().swipes.len()
    }

    /// All committed matches
    pub fn matches(&self) -> Vec<Match> {
        self.state.lock().matches.values().cloned().collect()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().sessions.len()
    }

    /// Pair locks currently allocated
    pub fn pair_lock_count(&self) -> usize {
        self.pair_locks.lock().len()
    }

    fn pair_lock(&self, a: UserId, b: UserId) -> Arc<AsyncMutex<()>> {
        let key = UserId::canonical_pair(a, b);
        self.pair_locks.lock().entry(key).or_default().clone()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.next_user_id += 1;
        let created = User {
            id: UserId::new(state.next_user_id),
            email: user.email.clone(),
            name: user.name.clone(),
            gender: user.gender,
            date_of_birth: user.date_of_birth,
            location: user.location,
            created_at: Utc::now(),
        };
        state
            .users
            .push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .map(|(u, _)| u)
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn find_candidates(
        &self,
        requester: UserId,
        filter: &CandidateFilter,
    ) -> RepoResult<Vec<Candidate>> {
        let state = self.state.lock();
        let candidates = state
            .users
            .iter()
            .map(|(u, _)| u)
            .filter(|u| u.id != requester)
            .filter(|u| {
                !state
                    .matches
                    .contains_key(&UserId::canonical_pair(requester, u.id))
            })
            // Only the requester's own swipes exclude a profile.
            .filter(|u| !state.swipes.contains_key(&(requester, u.id)))
            .filter(|u| filter.gender.map_or(true, |g| u.gender == g))
            .filter(|u| {
                filter
                    .birth_dates
                    .map_or(true, |w| w.contains(u.date_of_birth))
            })
            .map(|u| Candidate {
                user: u.clone(),
                attractiveness: state
                    .swipes
                    .values()
                    .filter(|s| s.swiped_user_id == u.id && s.interested)
                    .count() as i64,
            })
            .collect();
        Ok(candidates)
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn SwipeUnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            store: self.clone(),
            guards: PairGuards {
                locks: self.pair_locks.clone(),
                held: Vec::new(),
            },
            staged_swipes: HashMap::new(),
            staged_matches: HashMap::new(),
        }))
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn record(&self, session_id: &str, user_id: UserId, _ttl_seconds: u64) -> RepoResult<()> {
        self.state
            .lock()
            .sessions
            .insert(session_id.to_string(), user_id);
        Ok(())
    }

    async fn is_active(&self, session_id: &str, user_id: UserId) -> RepoResult<bool> {
        Ok(self.state.lock().sessions.get(session_id) == Some(&user_id))
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        self.state.lock().sessions.remove(session_id);
        Ok(())
    }
}

/// Pair locks held by one unit of work
struct PairGuards {
    locks: Arc<Mutex<HashMap<Pair, Arc<AsyncMutex<()>>>>>,
    held: Vec<OwnedMutexGuard<()>>,
}

impl Drop for PairGuards {
    fn drop(&mut self) {
        if self.held.is_empty() {
            return;
        }
        self.held.clear();
        // Only the map still references an idle lock.
        self.locks.lock().retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

/// Staged swipe/match writes, applied on commit
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    guards: PairGuards,
    staged_swipes: HashMap<Pair, Swipe>,
    staged_matches: HashMap<Pair, Match>,
}

impl InMemoryUnitOfWork {
    fn visible_swipe(&self, state: &State, pair: &Pair) -> Option<Swipe> {
        self.staged_swipes
            .get(pair)
            .or_else(|| state.swipes.get(pair))
            .cloned()
    }

    fn visible_match(&self, state: &State, pair: &Pair) -> Option<Match> {
        self.staged_matches
            .get(pair)
            .or_else(|| state.matches.get(pair))
            .cloned()
    }
}

#[async_trait]
impl SwipeStore for InMemoryUnitOfWork {
    async fn lock_pair(&mut self, a: UserId, b: UserId) -> RepoResult<()> {
        let guard = self.store.pair_lock(a, b).lock_owned().await;
        self.guards.held.push(guard);
        Ok(())
    }

    async fn upsert_swipe(
        &mut self,
        actor: UserId,
        target: UserId,
        interested: bool,
    ) -> RepoResult<Swipe> {
        if actor == target {
            return Err(DomainError::CannotSwipeSelf);
        }
        let state = self.store.state.lock();
        if state.user(target).is_none() {
            return Err(DomainError::UserNotFound(target));
        }
        if state.user(actor).is_none() {
            return Err(DomainError::UserNotFound(actor));
        }
        let created_at = self
            .visible_swipe(&state, &(actor, target))
            .map_or_else(Utc::now, |s| s.created_at);
        drop(state);

        let swipe = Swipe {
            user_id: actor,
            swiped_user_id: target,
            interested,
            created_at,
        };
        self.staged_swipes.insert((actor, target), swipe.clone());
        Ok(swipe)
    }

    async fn count_interested_between(&mut self, a: UserId, b: UserId) -> RepoResult<i64> {
        let state = self.store.state.lock();
        let count = [(a, b), (b, a)]
            .iter()
            .filter_map(|pair| self.visible_swipe(&state, pair))
            .filter(|s| s.interested)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl MatchStore for InMemoryUnitOfWork {
    async fn insert_match_if_absent(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>> {
        if self.store.fail_match_insert.swap(false, Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("injected failure".to_string()));
        }
        let pair = UserId::canonical_pair(a, b);
        let mut state = self.store.state.lock();
        if self.visible_match(&state, &pair).is_some() {
            return Ok(None);
        }
        state.next_match_id += 1;
        let created = Match {
            id: state.next_match_id,
            user1_id: pair.0,
            user2_id: pair.1,
            created_at: Utc::now(),
        };
        drop(state);
        self.staged_matches.insert(pair, created.clone());
        Ok(Some(created))
    }

    async fn find_match(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>> {
        let pair = UserId::canonical_pair(a, b);
        let state = self.store.state.lock();
        Ok(self.visible_match(&state, &pair))
    }
}

#[async_trait]
impl SwipeUnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let this = *self;
        let mut state = this.store.state.lock();
        // Same guarantee as the unique constraint on matches.
        if this
            .staged_matches
            .keys()
            .any(|pair| state.matches.contains_key(pair))
        {
            return Err(DomainError::SwipeConflict);
        }
        state.swipes.extend(this.staged_swipes);
        state.matches.extend(this.staged_matches);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dating_core::Gender;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Test".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_discards_writes() {
        let store = InMemoryStore::new();
        let a = store.create(&new_user("a@example.com")).await.unwrap();
        let b = store.create(&new_user("b@example.com")).await.unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.upsert_swipe(a.id, b.id, true).await.unwrap();
        assert_eq!(uow.count_interested_between(a.id, b.id).await.unwrap(), 1);
        drop(uow);

        assert_eq!(store.swipe_count(), 0);
    }

    #[tokio::test]
    async fn test_commit_applies_writes() {
        let store = InMemoryStore::new();
        let a = store.create(&new_user("a@example.com")).await.unwrap();
        let b = store.create(&new_user("b@example.com")).await.unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.upsert_swipe(a.id, b.id, false).await.unwrap();
        uow.commit().await.unwrap();

        let swipe = store.swipe(a.id, b.id).unwrap();
        assert!(!swipe.interested);
    }

    #[tokio::test]
    async fn test_pair_locks_released_after_unit_of_work() {
        let store = InMemoryStore::new();
        let a = store.create(&new_user("a@example.com")).await.unwrap();
        let b = store.create(&new_user("b@example.com")).await.unwrap();
        let c = store.create(&new_user("c@example.com")).await.unwrap();

        let mut uow = store.begin().await.unwrap();
        uow.lock_pair(a.id, b.id).await.unwrap();
        assert_eq!(store.pair_lock_count(), 1);
        uow.upsert_swipe(a.id, b.id, true).await.unwrap();
        uow.commit().await.unwrap();
        assert_eq!(store.pair_lock_count(), 0);

        let mut uow = store.begin().await.unwrap();
        uow.lock_pair(c.id, a.id).await.unwrap();
        drop(uow);
        assert_eq!(store.pair_lock_count(), 0);
    }

    #[tokio::test]
    async fn test_waiting_unit_of_work_keeps_pair_lock() {
        let store = InMemoryStore::new();
        let a = store.create(&new_user("a@example.com")).await.unwrap();
        let b = store.create(&new_user("b@example.com")).await.unwrap();

        let mut first = store.begin().await.unwrap();
        first.lock_pair(a.id, b.id).await.unwrap();

        let waiter_store = store.clone();
        let waiter = tokio::spawn(async move {
            let mut second = waiter_store.begin().await.unwrap();
            second.lock_pair(b.id, a.id).await.unwrap();
            second.upsert_swipe(b.id, a.id, true).await.unwrap();
            second.commit().await.unwrap();
        });
        tokio::task::yield_now().await;

        drop(first);
        waiter.await.unwrap();

        assert!(store.swipe(b.id, a.id).is_some());
        assert_eq!(store.pair_lock_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryStore::new();
        store.create(&new_user("a@example.com")).await.unwrap();
        let err = store.create(&new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists));
    }
}
