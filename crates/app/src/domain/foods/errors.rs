//! Foods service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::media::MediaStorageError;

#[derive(Debug, Error)]
pub enum FoodsServiceError {
    #[error("food already exists")]
    AlreadyExists,

    #[error("referenced account does not exist")]
    InvalidReference,

    #[error("food is missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("food not found")]
    NotFound,

    #[error("food belongs to another partner")]
    Forbidden,

    #[error("media upload failed")]
    Media(#[source] MediaStorageError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FoodsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<MediaStorageError> for FoodsServiceError {
    fn from(error: MediaStorageError) -> Self {
        Self::Media(error)
    }
}
