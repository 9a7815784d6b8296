//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use toolrank_core::error::DomainError;
use tracing::warn;

/// Convert SQLx error to DomainError
///
/// Every driver failure surfaces as `StorageUnavailable` so callers can tell
/// infrastructure trouble apart from quota rejections.
pub fn map_db_error(e: SqlxError) -> DomainError {
    warn!(error = %e, "Storage operation failed");
    DomainError::StorageUnavailable(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_are_storage_unavailable() {
        let err = map_db_error(SqlxError::PoolTimedOut);
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_non_unique_error_falls_through() {
        let err = map_unique_violation(SqlxError::PoolClosed, || DomainError::DuplicateVote);
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }
}
