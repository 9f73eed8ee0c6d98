//! Errors raised by domain value objects.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected by a business rule, safe to show to the caller
    #[error("{0}")]
    Rule(String),

    /// The password hasher itself failed
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
