//! User model -> entity mapper

use dating_core::entities::{Candidate, User};
use dating_core::error::DomainError;
use dating_core::value_objects::{Location, UserId};

use crate::models::{CandidateModel, UserModel};

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let gender = model
            .gender
            .parse()
            .map_err(|e| DomainError::DatabaseError(format!("user {}: {e}", model.id)))?;

        Ok(User {
            id: UserId::new(model.id),
            email: model.email,
            name: model.name,
            gender,
            date_of_birth: model.date_of_birth,
            location: Location::from_parts(model.location_lat, model.location_long),
            created_at: model.created_at,
        })
    }
}

impl TryFrom<CandidateModel> for Candidate {
    type Error = DomainError;

    fn try_from(model: CandidateModel) -> Result<Self, Self::Error> {
        Ok(Candidate {
            user: User::try_from(model.user)?,
            attractiveness: model.attractiveness_score,
        })
    }
}
