//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, discovery, health, swipes, users};
use crate::state::AppState;

/// Create the API router (excluding health routes, which skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(auth_routes())
        .merge(matching_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/user/create", post(users::create_user))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Swipe and discovery routes, all authenticated
fn matching_routes() -> Router<AppState> {
    Router::new()
        .route("/swipe", post(swipes::swipe))
        .route("/discover", get(discovery::discover))
}
