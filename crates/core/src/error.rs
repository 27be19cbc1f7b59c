//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The variants mirror the HTTP taxonomy the API exposes (400/404/401/403/500)
/// but stay transport-agnostic: mapping to status codes lives in the API crate.
/// Messages are user-facing and travel through the response envelope as-is,
/// except for `Internal`, whose detail is logged and never leaked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input, or an out-of-range value.
    #[error("{0}")]
    Validation(String),

    /// A requested resource was not found.
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed (inactive account or wrong role).
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected/storage failure. The message is internal detail.
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
