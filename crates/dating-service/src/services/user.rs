//! User service
//!
//! Handles profile registration.

use dating_common::hash_password;
use dating_core::{DomainError, Location, NewUser};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new profile
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        if let Err(errors) = request.validate() {
            if errors.field_errors().contains_key("email") {
                return Err(DomainError::InvalidEmail.into());
            }
            return Err(errors.into());
        }

        let gender = request
            .parsed_gender()
            .ok_or_else(|| ServiceError::validation("Gender must be M or F"))?;
        let date_of_birth = request
            .parsed_date_of_birth()
            .ok_or_else(|| ServiceError::validation("Date of birth must be formatted YYYY-MM-DD"))?;
        let location = Location::from_parts(request.location_lat, request.location_long);

        if self.ctx.user_store().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .ctx
            .user_store()
            .create(&NewUser {
                email: request.email,
                password_hash,
                name: request.name,
                gender,
                date_of_birth,
                location,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(UserResponse::from(&user))
    }
}
