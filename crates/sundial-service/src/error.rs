use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] sundial_db::error::DbError),

    #[error(transparent)]
    RepeatError(#[from] sundial_repeat::error::RepeatError),

    #[error(transparent)]
    CoreError(#[from] sundial_core::error::CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
