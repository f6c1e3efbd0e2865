//! Authentication service
//!
//! Handles login, logout, and access-token authentication. Every issued
//! token's `jti` is recorded in the session store; a token whose session is
//! gone is rejected even if its signature and expiry are still valid.

use dating_common::{verify_password, AppError};
use dating_core::{DomainError, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Identity resolved from a valid access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub session_id: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_store()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: unknown email");
                DomainError::EmailNotFound
            })?;

        let password_hash = self
            .ctx
            .user_store()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let issued = self.ctx.jwt_service().issue_token(user.id)?;
        let ttl = u64::try_from(self.ctx.jwt_service().expiry_seconds()).unwrap_or(0);
        self.ctx
            .session_store()
            .record(&issued.session_id, user.id, ttl)
            .await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(TokenResponse {
            token: issued.token,
            expires: issued.expires_at.timestamp(),
        })
    }

    /// Revoke a session
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn logout(&self, auth: &AuthenticatedUser) -> ServiceResult<()> {
        self.ctx.session_store().revoke(&auth.session_id).await?;
        info!(user_id = %auth.user_id, "User logged out successfully");
        Ok(())
    }

    /// Validate an access token and check that its session is still live
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<AuthenticatedUser> {
        let claims = self.ctx.jwt_service().validate_token(token)?;
        let user_id = claims.user_id()?;

        if !self
            .ctx
            .session_store()
            .is_active(&claims.jti, user_id)
            .await?
        {
            warn!(user_id = %user_id, "Rejected token for revoked session");
            return Err(AppError::SessionRevoked.into());
        }

        Ok(AuthenticatedUser {
            user_id,
            session_id: claims.jti,
        })
    }
}
