//! User entity - a registered dating profile

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{age_on, Gender, Location, UserId};

/// A registered profile.
///
/// The password hash never leaves the store on this type; see
/// [`UserStore::get_password_hash`](crate::traits::UserStore::get_password_hash).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub location: Option<Location>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Age in whole years as of `today`
    #[inline]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }

    /// Age in whole years as of the current UTC date
    pub fn age(&self) -> i32 {
        self.age_on(Utc::now().date_naive())
    }
}

/// Data required to register a profile
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub location: Option<Location>,
}
