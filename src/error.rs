//! Error types for the Printful client
//!
//! Every failure surfaces synchronously to the caller of the operation that
//! produced it. Nothing is retried and nothing is partially applied.

use thiserror::Error;

use crate::validation::Violations;

/// HTTP-equivalent status attached to validation failures
pub const VALIDATION_STATUS: u16 = 400;

/// Printful client error types
#[derive(Debug, Error)]
pub enum PrintfulError {
    /// Credentials or base URL are missing or malformed. Raised only while
    /// constructing a client; no client is returned.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The outbound payload failed its presence rules. The transport was
    /// never invoked.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Violations,
    },

    /// The remote call completed with a status other than 200, or the body
    /// could not be decoded into the expected result envelope.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The round trip itself failed (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for Printful operations
pub type PrintfulResult<T> = Result<T, PrintfulError>;

impl PrintfulError {
    /// Build a validation error from a non-empty set of violations
    pub fn validation(errors: Violations) -> Self {
        let message = errors.summary();
        PrintfulError::Validation { message, errors }
    }

    /// HTTP status (or its equivalent) carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PrintfulError::Validation { .. } => Some(VALIDATION_STATUS),
            PrintfulError::Api { status, .. } => Some(*status),
            PrintfulError::Http(e) => e.status().map(|s| s.as_u16()),
            PrintfulError::Configuration(_) => None,
        }
    }

    /// Per-field violations for validation errors
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            PrintfulError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PrintfulError::Configuration(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PrintfulError::Validation { .. })
    }

    pub fn is_api(&self) -> bool {
        matches!(self, PrintfulError::Api { .. })
    }
}
