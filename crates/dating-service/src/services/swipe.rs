//! Swipe service
//!
//! A swipe is recorded and checked for a mutual match inside one unit of
//! work. The pair is locked first so that two people swiping on each other at
//! the same moment cannot both miss the other's swipe. Any error drops the
//! unit of work, which discards the swipe.

use dating_core::traits::{MatchStore, RepoResult, SwipeStore, SwipeUnitOfWork, UnitOfWorkFactory};
use dating_core::{DomainError, MatchResult, Swipe, UserId};
use tracing::{debug, info, instrument};

use crate::dto::{MatchResponse, SwipeRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Insert or overwrite `actor`'s decision about `target`
pub async fn record_swipe<S>(
    store: &mut S,
    actor: UserId,
    target: UserId,
    interested: bool,
) -> RepoResult<Swipe>
where
    S: SwipeStore + ?Sized,
{
    store.upsert_swipe(actor, target, interested).await
}

/// Create the match for `{a, b}` once both have swiped yes.
///
/// If another transaction already created the match, its id is reported.
pub async fn detect_and_create_match<S>(store: &mut S, a: UserId, b: UserId) -> RepoResult<MatchResult>
where
    S: SwipeStore + MatchStore + ?Sized,
{
    let interested = store.count_interested_between(a, b).await?;
    if interested < 2 {
        return Ok(MatchResult::NO_MATCH);
    }

    if let Some(created) = store.insert_match_if_absent(a, b).await? {
        info!(match_id = created.id, user1 = %created.user1_id, user2 = %created.user2_id, "Match created");
        return Ok(MatchResult::matched(created.id));
    }

    match store.find_match(a, b).await? {
        Some(existing) => Ok(MatchResult::matched(existing.id)),
        // The insert conflicted, so the row must exist.
        None => Err(DomainError::SwipeConflict),
    }
}

/// Swipe service
pub struct SwipeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SwipeService<'a> {
    /// Create a new SwipeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a swipe by `actor` and report whether it completed a match
    #[instrument(skip(self, request), fields(actor = %actor, target = %request.user_id))]
    pub async fn swipe(&self, actor: UserId, request: SwipeRequest) -> ServiceResult<MatchResponse> {
        let target = request.user_id;
        let interested = request.preference.is_interested();

        if actor == target {
            return Err(DomainError::CannotSwipeSelf.into());
        }
        if self.ctx.user_store().find_by_id(target).await?.is_none() {
            return Err(DomainError::UserNotFound(target).into());
        }

        let mut uow = self.ctx.unit_of_work().begin().await?;
        uow.lock_pair(actor, target).await?;
        let swipe = record_swipe(&mut *uow, actor, target, interested).await?;
        debug!(interested = swipe.interested, "Swipe recorded");
        let result = detect_and_create_match(&mut *uow, actor, target).await?;
        uow.commit().await?;

        info!(
            interested,
            matched = result.matched,
            match_id = ?result.match_id,
            "Swipe processed"
        );

        Ok(MatchResponse::from(result))
    }
}
