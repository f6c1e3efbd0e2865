//! Authentication handlers
//!
//! Endpoints for login and logout.

use axum::{extract::State, Json};
use dating_service::dto::{LoginRequest, TokenResponse};
use dating_service::{AuthService, AuthenticatedUser};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the caller's current session
///
/// POST /logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.logout(&AuthenticatedUser::from(&auth)).await?;
    Ok(NoContent)
}
