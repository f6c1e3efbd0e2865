//! Discovery handlers

use axum::{
    extract::{Query, State},
    Json,
};
use dating_service::dto::{DiscoverQuery, DiscoveryResponse};
use dating_service::DiscoveryService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Ranked profiles for the caller
///
/// GET /discover?min_age=&max_age=&gender=
pub async fn discover(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DiscoverQuery>,
) -> ApiResult<Json<Vec<DiscoveryResponse>>> {
    let service = DiscoveryService::new(state.service_context());
    let response = service.discover(auth.user_id, query).await?;
    Ok(Json(response))
}
