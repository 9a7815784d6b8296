//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::IdParseError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Quota Errors
    // =========================================================================
    #[error("You have already upvoted this tool today")]
    AlreadyVotedToday,

    #[error("Daily upvote limit reached: {used} of {limit} used")]
    DailyLimitReached { limit: u32, used: u32 },

    #[error("Upvote already recorded for this tool today")]
    DuplicateVote,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid user id: {0}")]
    InvalidUserId(IdParseError),

    #[error("Invalid tool id: {0}")]
    InvalidToolId(IdParseError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Quota
            Self::AlreadyVotedToday => "ALREADY_VOTED_TODAY",
            Self::DailyLimitReached { .. } => "DAILY_LIMIT_REACHED",
            Self::DuplicateVote => "DUPLICATE_VOTE",

            // Validation
            Self::InvalidUserId(_) => "INVALID_USER_ID",
            Self::InvalidToolId(_) => "INVALID_TOOL_ID",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is an expected quota rejection (user-recoverable at the next day boundary)
    pub fn is_quota(&self) -> bool {
        matches!(
            self,
            Self::AlreadyVotedToday | Self::DailyLimitReached { .. } | Self::DuplicateVote
        )
    }

    /// Check if this is a per-tool duplicate (callers treat both variants the same)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyVotedToday | Self::DuplicateVote)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidUserId(_) | Self::InvalidToolId(_) | Self::ValidationError(_)
        )
    }

    /// Check if the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
