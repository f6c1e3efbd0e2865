//! Swipe handlers

use axum::{extract::State, Json};
use dating_service::dto::{MatchResponse, SwipeRequest};
use dating_service::SwipeService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Swipe yes or no on a profile
///
/// POST /swipe
pub async fn swipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SwipeRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = SwipeService::new(state.service_context());
    let response = service.swipe(auth.user_id, request).await?;
    Ok(Json(response))
}
