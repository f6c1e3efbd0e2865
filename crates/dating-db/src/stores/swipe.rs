//! PostgreSQL swipe/match unit of work
//!
//! A [`PgUnitOfWork`] owns an open transaction. Swipe upserts, the
//! reciprocity count and the match insert all run on it, so they commit or
//! roll back together. Dropping the unit of work rolls the transaction back.

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use dating_core::entities::{Match, Swipe};
use dating_core::error::DomainError;
use dating_core::traits::{MatchStore, RepoResult, SwipeStore, SwipeUnitOfWork, UnitOfWorkFactory};
use dating_core::value_objects::UserId;

use crate::models::{MatchModel, SwipeModel};

use super::error::{map_constraint_violation, map_db_error, map_unique_violation};

/// Advisory lock key for the unordered pair `{a, b}`.
///
/// Distinct pairs of ids below 2^32 get distinct keys. A collision beyond that
/// only serialises two unrelated pairs.
pub(crate) fn pair_lock_key(a: UserId, b: UserId) -> i64 {
    let (low, high) = UserId::canonical_pair(a, b);
    low.into_inner().wrapping_shl(32) ^ high.into_inner()
}

/// Opens [`PgUnitOfWork`]s on a pool
#[derive(Clone)]
pub struct PgUnitOfWorkFactory {
    pool: PgPool,
}

impl PgUnitOfWorkFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PgUnitOfWorkFactory {
    async fn begin(&self) -> RepoResult<Box<dyn SwipeUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

/// A swipe/match transaction
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SwipeStore for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn lock_pair(&mut self, a: UserId, b: UserId) -> RepoResult<()> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(pair_lock_key(a, b))
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert_swipe(
        &mut self,
        actor: UserId,
        target: UserId,
        interested: bool,
    ) -> RepoResult<Swipe> {
        let model = sqlx::query_as::<_, SwipeModel>(
            r"
            INSERT INTO user_swipes (user_id, swiped_user_id, swipe_status)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, swiped_user_id)
            DO UPDATE SET swipe_status = EXCLUDED.swipe_status
            RETURNING user_id, swiped_user_id, swipe_status, created_at
            ",
        )
        .bind(actor.into_inner())
        .bind(target.into_inner())
        .bind(interested)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |kind| match kind {
                ErrorKind::ForeignKeyViolation => Some(DomainError::UserNotFound(target)),
                ErrorKind::CheckViolation => Some(DomainError::CannotSwipeSelf),
                ErrorKind::UniqueViolation => Some(DomainError::SwipeConflict),
                _ => None,
            })
        })?;

        Ok(Swipe::from(model))
    }

    #[instrument(skip(self))]
    async fn count_interested_between(&mut self, a: UserId, b: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM user_swipes
            WHERE swipe_status
              AND ((user_id = $1 AND swiped_user_id = $2)
                OR (user_id = $2 AND swiped_user_id = $1))
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl MatchStore for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn insert_match_if_absent(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>> {
        let (user1, user2) = UserId::canonical_pair(a, b);

        let model = sqlx::query_as::<_, MatchModel>(
            r"
            INSERT INTO matches (user1_id, user2_id)
            VALUES ($1, $2)
            ON CONFLICT (user1_id, user2_id) DO NOTHING
            RETURNING id, user1_id, user2_id, created_at
            ",
        )
        .bind(user1.into_inner())
        .bind(user2.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SwipeConflict))?;

        Ok(model.map(Match::from))
    }

    #[instrument(skip(self))]
    async fn find_match(&mut self, a: UserId, b: UserId) -> RepoResult<Option<Match>> {
        let (user1, user2) = UserId::canonical_pair(a, b);

        let model = sqlx::query_as::<_, MatchModel>(
            r"
            SELECT id, user1_id, user2_id, created_at
            FROM matches
            WHERE user1_id = $1 AND user2_id = $2
            ",
        )
        .bind(user1.into_inner())
        .bind(user2.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(model.map(Match::from))
    }
}

#[async_trait]
impl SwipeUnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lock_key_is_order_independent() {
        let a = UserId::new(17);
        let b = UserId::new(4);
        assert_eq!(pair_lock_key(a, b), pair_lock_key(b, a));
    }

    #[test]
    fn test_pair_lock_key_distinguishes_small_pairs() {
        let key = |x, y| pair_lock_key(UserId::new(x), UserId::new(y));
        assert_ne!(key(1, 2), key(1, 3));
        assert_ne!(key(1, 3), key(2, 3));
        assert_eq!(key(1, 2), (1_i64 << 32) ^ 2);
    }
}
