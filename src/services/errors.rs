use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("Invalid request: {0}")]
    Form(String),

    #[error("Database URL not set")]
    DataStoreUnavailable,

    #[error("Advocates have already been seeded")]
    AlreadySeeded,

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
