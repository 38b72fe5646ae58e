//! Page loaders combining the synchronizer and the API readers.

use thiserror::Error;

use crate::api::errors::ApiError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

pub mod calendar;
pub mod lot;
pub mod search;

/// Errors surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

/// Convenient alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => ServiceError::NotFound,
            other => ServiceError::Upstream(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}
