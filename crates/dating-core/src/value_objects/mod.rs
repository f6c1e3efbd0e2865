//! Value objects - immutable types that represent domain concepts

mod age;
mod gender;
mod location;
mod user_id;

pub use age::{age_on, AgeRange, BirthDateWindow};
pub use gender::{Gender, GenderParseError};
pub use location::Location;
pub use user_id::{UserId, UserIdParseError};
