//! Access-token sessions in Redis.
//!
//! Every issued access token has a `jti`. The session store keeps
//! `session:{jti}` alive for the token's lifetime; logging out deletes it, which
//! invalidates the token even though its signature is still valid.

use async_trait::async_trait;
use dating_core::{DomainError, RepoResult, SessionStore, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for access-token sessions
pub const SESSION_PREFIX: &str = "session:";

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// User the token was issued to
    pub user_id: UserId,
    /// Issue timestamp (Unix epoch seconds)
    pub created_at: i64,
}

/// Redis-backed [`SessionStore`]
#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }
}

fn cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self))]
    async fn record(&self, session_id: &str, user_id: UserId, ttl_seconds: u64) -> RepoResult<()> {
        let data = SessionData {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        };
        self.pool
            .set(&Self::key(session_id), &data, Some(ttl_seconds))
            .await
            .map_err(cache_error)?;

        tracing::debug!(session_id = %session_id, user_id = %user_id, "Stored session");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_active(&self, session_id: &str, user_id: UserId) -> RepoResult<bool> {
        let data: Option<SessionData> = self
            .pool
            .get_value(&Self::key(session_id))
            .await
            .map_err(cache_error)?;

        Ok(data.is_some_and(|d| d.user_id == user_id))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        let deleted = self
            .pool
            .delete(&Self::key(session_id))
            .await
            .map_err(cache_error)?;

        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked session");
        }
        Ok(())
    }
}
