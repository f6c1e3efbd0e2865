//! Service context - dependency container for services
//!
//! Holds the stores, the JWT service, and the raw pools used by health checks.

use std::sync::Arc;

use dating_cache::SharedRedisPool;
use dating_common::JwtService;
use dating_core::traits::{SessionStore, UnitOfWorkFactory, UserStore};
use dating_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// The pools are optional so that services can run against in-memory
/// stores; readiness checks report a missing pool as unhealthy.
#[derive(Clone)]
pub struct ServiceContext {
    // Pools (health checks only)
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,

    // Stores
    user_store: Arc<dyn UserStore>,
    unit_of_work: Arc<dyn UnitOfWorkFactory>,
    session_store: Arc<dyn SessionStore>,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis connection pool, if one is configured
    pub fn redis_pool(&self) -> Option<&SharedRedisPool> {
        self.redis_pool.as_ref()
    }

    // === Stores ===

    /// Get the user store
    pub fn user_store(&self) -> &dyn UserStore {
        self.user_store.as_ref()
    }

    /// Get the factory for swipe/match transactions
    pub fn unit_of_work(&self) -> &dyn UnitOfWorkFactory {
        self.unit_of_work.as_ref()
    }

    /// Get the access-token session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Health ===

    /// Ping the database with a trivial query
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => dating_db::ping(pool).await.is_ok(),
            None => false,
        }
    }

    /// Ping Redis
    pub async fn redis_healthy(&self) -> bool {
        match &self.redis_pool {
            Some(pool) => pool.health_check().await.is_ok(),
            None => false,
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool.as_ref().map(|_| "SharedRedisPool"))
            .field("stores", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_store: Option<Arc<dyn UserStore>>,
    unit_of_work: Option<Arc<dyn UnitOfWorkFactory>>,
    session_store: Option<Arc<dyn SessionStore>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    pub fn unit_of_work(mut self, factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        self.unit_of_work = Some(factory);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_store: self
                .user_store
                .ok_or_else(|| ServiceError::validation("user_store is required"))?,
            unit_of_work: self
                .unit_of_work
                .ok_or_else(|| ServiceError::validation("unit_of_work is required"))?,
            session_store: self
                .session_store
                .ok_or_else(|| ServiceError::validation("session_store is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        })
    }
}
