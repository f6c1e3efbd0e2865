//! Authentication extractor
//!
//! Extracts the bearer token from the Authorization header, validates it, and
//! checks that its session has not been revoked.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use dating_core::UserId;
use dating_service::{AuthService, AuthenticatedUser};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
    /// Session (`jti`) the token belongs to
    pub session_id: String,
}

impl From<AuthenticatedUser> for AuthUser {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            user_id: auth.user_id,
            session_id: auth.session_id,
        }
    }
}

impl From<&AuthUser> for AuthenticatedUser {
    fn from(auth: &AuthUser) -> Self {
        Self {
            user_id: auth.user_id,
            session_id: auth.session_id.clone(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    if parts.headers.contains_key(header::AUTHORIZATION) {
                        ApiError::InvalidAuthFormat
                    } else {
                        ApiError::MissingAuth
                    }
                })?;

        let app_state = AppState::from_ref(state);

        let authenticated = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::from(e)
            })?;

        Ok(authenticated.into())
    }
}
