//! # dating-cache
//!
//! Redis layer: a pooled connection manager and the access-token session store.
//!
//! ## Example
//!
//! ```ignore
//! use dating_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool.clone());
//! sessions.record(&jti, user_id, 1800).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RedisSessionStore, SessionData, SESSION_PREFIX};
