//! Model to entity mappers
//!
//! Conversions from database rows to `dating-core` entities. User rows carry
//! the gender as text, so their conversion is fallible.

mod matching;
mod user;
