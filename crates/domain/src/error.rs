//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The suite name does not match any known suite.
    #[error("unknown suite: {0}")]
    UnknownSuite(String),

    /// A setting is out of range or inconsistent.
    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting {
        /// Setting name as the user would type it.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DomainError {
    /// Creates an `InvalidSetting` error.
    #[must_use]
    pub fn invalid_setting(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
