//! # dating-db
//!
//! Database layer implementing the dating-core store traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgUserStore` for profiles and discovery queries
//! - `PgUnitOfWork` for the swipe/match transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dating_db::{create_pool, run_migrations, PgUnitOfWorkFactory, PgUserStore, PoolSettings};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolSettings::new("postgres://localhost/dating")).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserStore::new(pool.clone());
//!     let swipes = PgUnitOfWorkFactory::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolSettings};
pub use stores::{PgUnitOfWork, PgUnitOfWorkFactory, PgUserStore};
