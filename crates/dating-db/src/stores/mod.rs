//! Store implementations
//!
//! PostgreSQL implementations of the store traits defined in dating-core.

mod error;
mod swipe;
mod user;

pub use swipe::{PgUnitOfWork, PgUnitOfWorkFactory};
pub use user::PgUserStore;
