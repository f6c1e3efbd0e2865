//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a call.

pub mod auth;
pub mod context;
pub mod discovery;
pub mod error;
pub mod swipe;
pub mod user;

pub use auth::{AuthService, AuthenticatedUser};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use discovery::DiscoveryService;
pub use error::{ServiceError, ServiceResult};
pub use swipe::{detect_and_create_match, record_swipe, SwipeService};
pub use user::UserService;
