//! Access-token session tracking

mod access_session;

pub use access_session::{RedisSessionStore, SessionData, SESSION_PREFIX};
