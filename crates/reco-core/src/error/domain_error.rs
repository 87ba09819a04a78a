//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// An identifier that could not be parsed into the store's id type.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced query identifier was missing where one is required.
    #[error("Missing query identifier")]
    MissingQueryId,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "INVALID_ID",
            Self::MissingQueryId => "MISSING_QUERY_ID",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error was caused by caller-supplied identifiers
    #[must_use]
    pub fn is_bad_identifier(&self) -> bool {
        matches!(self, Self::InvalidId(_) | Self::MissingQueryId)
    }
}
