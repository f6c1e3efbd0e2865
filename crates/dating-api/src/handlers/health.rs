//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use dating_service::dto::ReadinessResponse;

use crate::state::AppState;

/// Liveness probe
///
/// GET /healthz
pub async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let (db_healthy, redis_healthy) = tokio::join!(ctx.database_healthy(), ctx.redis_healthy());

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
