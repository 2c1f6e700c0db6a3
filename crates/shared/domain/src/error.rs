//! Errors raised by domain rules.

use thiserror::Error;

/// A domain rule rejected an input, or a domain operation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input breaks a field rule (unknown role, bad format)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password policy violation
    #[error("Password error: {0}")]
    Password(String),

    /// Operation failed for reasons the caller cannot fix
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
