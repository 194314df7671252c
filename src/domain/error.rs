//! Application error type for the request pipeline edge.
//!
//! Violations are data, not exceptions: the validator returns them as a list
//! and this enum only exists where the pipeline must short-circuit into an
//! HTTP response.

use thiserror::Error;

use super::types::{CanonicalError, ValidationError};

/// Errors surfaced by the guard middleware
#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected by the schema validator; carries every violation
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),

    /// Request body was present but not parseable as JSON
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// Request body exceeded the configured cap
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// A downstream wallet or network failure, already classified
    #[error("{0}")]
    Wallet(CanonicalError),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CanonicalError> for AppError {
    fn from(err: CanonicalError) -> Self {
        Self::Wallet(err)
    }
}
