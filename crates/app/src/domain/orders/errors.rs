//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::payments::PaymentGatewayError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order belongs to another account")]
    Forbidden,

    #[error("cart is empty")]
    CartEmpty,

    #[error("payment not completed")]
    PaymentIncomplete,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("an order already exists for this payment")]
    AlreadyExists,

    #[error("referenced record does not exist")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("payment gateway failure")]
    Gateway(#[source] PaymentGatewayError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PaymentGatewayError> for OrdersServiceError {
    fn from(error: PaymentGatewayError) -> Self {
        Self::Gateway(error)
    }
}
