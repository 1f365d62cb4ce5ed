use salvo::http::StatusCode;
use thiserror::Error;

use sundial_core::error::CoreError;
use sundial_db::error::DbError;
use sundial_repeat::error::RepeatError;
use sundial_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    RepeatError(#[from] RepeatError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// HTTP status for this error. Engine and validation failures are the
    /// caller's fault (400), auth failures 401, missing tasks 404 and
    /// everything else a server error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => service_status(err),
            Self::DatabaseError(err) => db_status(err),
            Self::RepeatError(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(err) => core_status(err),
        }
    }
}

fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::ValidationError(_)
        | ServiceError::RepeatError(_)
        | ServiceError::InvalidConfiguration(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::DatabaseError(err) => db_status(err),
        ServiceError::CoreError(err) => core_status(err),
    }
}

fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::TaskNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::ParseError(_) | CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
