//! Service-level error model.

use thiserror::Error;

use carmarket_core::DomainError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by catalog, wishlist and contact services.
///
/// Domain errors are flattened into their own variants so callers map one enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// The backing store cannot serve requests (e.g. a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::InvalidId(msg) => ServiceError::InvalidId(msg),
            DomainError::NotFound => ServiceError::NotFound,
        }
    }
}
