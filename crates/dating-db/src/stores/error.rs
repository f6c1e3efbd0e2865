//! Error handling utilities for stores

use dating_core::error::DomainError;
use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a constraint violation to a domain error, falling back to a storage error
pub fn map_constraint_violation<F>(e: SqlxError, on_violation: F) -> DomainError
where
    F: FnOnce(ErrorKind) -> Option<DomainError>,
{
    if let Some(db_err) = e.as_database_error() {
        if let Some(mapped) = on_violation(db_err.kind()) {
            return mapped;
        }
    }
    map_db_error(e)
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    map_constraint_violation(e, |kind| {
        matches!(kind, ErrorKind::UniqueViolation).then(on_unique)
    })
}
