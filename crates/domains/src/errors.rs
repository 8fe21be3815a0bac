//! # DomainError
//!
//! Centralized error handling for the blog platform.
//! Every port and service returns these; adapters translate them to their
//! own transport (HTTP status codes, process exit codes).

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, malformed, tampered or expired credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but the role or ownership check failed.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource or account absent.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or referential-integrity violation (duplicate email,
    /// duplicate flag, role still in use).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input rejected before touching the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure (database down, hashing backend failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(why: impl Into<String>) -> Self {
        Self::Forbidden(why.into())
    }

    pub fn conflict(why: impl Into<String>) -> Self {
        Self::Conflict(why.into())
    }

    pub fn validation(why: impl Into<String>) -> Self {
        Self::Validation(why.into())
    }

    pub fn internal(why: impl std::fmt::Display) -> Self {
        Self::Internal(why.to_string())
    }
}

/// A specialized Result type for blog platform logic.
pub type Result<T> = std::result::Result<T, DomainError>;
