//! PostgreSQL implementation of UserStore

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use dating_core::entities::{Candidate, NewUser, User};
use dating_core::error::DomainError;
use dating_core::traits::{CandidateFilter, RepoResult, UserStore};
use dating_core::value_objects::UserId;

use crate::models::{CandidateModel, UserModel};

use super::error::{map_db_error, map_unique_violation};

const USER_COLUMNS: &str =
    "id, email, name, gender, date_of_birth, location_lat, location_long, created_at";

/// PostgreSQL implementation of UserStore
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new PgUserStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, bind: UserLookup<'_>) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}");
        let query = sqlx::query_as::<_, UserModel>(&sql);
        let query = match bind {
            UserLookup::Id(id) => query.bind(id.into_inner()),
            UserLookup::Email(email) => query.bind(email),
        };

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(User::try_from)
            .transpose()
    }
}

enum UserLookup<'a> {
    Id(UserId),
    Email(&'a str),
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let (lat, long) = match user.location {
            Some(location) => (Some(location.latitude), Some(location.longitude)),
            None => (None, None),
        };

        let sql = format!(
            r"
            INSERT INTO users (email, password, name, gender, date_of_birth, location_lat, location_long)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "
        );

        let model = sqlx::query_as::<_, UserModel>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.gender.as_str())
            .bind(user.date_of_birth)
            .bind(lat)
            .bind(long)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        User::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.find_one("id = $1", UserLookup::Id(id)).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email = $1", UserLookup::Email(email)).await
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_candidates(
        &self,
        requester: UserId,
        filter: &CandidateFilter,
    ) -> RepoResult<Vec<Candidate>> {
        let (born_after, born_on_or_before): (Option<NaiveDate>, Option<NaiveDate>) =
            match filter.birth_dates {
                Some(window) => (Some(window.earliest_exclusive), Some(window.latest)),
                None => (None, None),
            };

        // Only the requester's outgoing swipes exclude a candidate. A candidate
        // who swiped the requester (yes or no) stays visible until the requester
        // swipes back.
        let rows = sqlx::query_as::<_, CandidateModel>(
            r"
            SELECT u.id, u.email, u.name, u.gender, u.date_of_birth,
                   u.location_lat, u.location_long, u.created_at,
                   (
                       SELECT COUNT(*)
                       FROM user_swipes r
                       WHERE r.swiped_user_id = u.id AND r.swipe_status
                   ) AS attractiveness_score
            FROM users u
            WHERE u.id <> $1
              AND NOT EXISTS (
                  SELECT 1 FROM matches m
                  WHERE m.user1_id = LEAST($1, u.id) AND m.user2_id = GREATEST($1, u.id)
              )
              AND NOT EXISTS (
                  SELECT 1 FROM user_swipes s
                  WHERE s.user_id = $1 AND s.swiped_user_id = u.id
              )
              AND ($2::TEXT IS NULL OR u.gender = $2)
              AND ($3::DATE IS NULL OR u.date_of_birth > $3)
              AND ($4::DATE IS NULL OR u.date_of_birth <= $4)
            ",
        )
        .bind(requester.into_inner())
        .bind(filter.gender.map(|g| g.as_str()))
        .bind(born_after)
        .bind(born_on_or_before)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Candidate::try_from).collect()
    }
}
