//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("item not in cart")]
    ItemNotFound,

    #[error("food not found")]
    FoodNotFound,

    #[error("food price is not set")]
    PriceNotSet,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("referenced record does not exist")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("cart total exceeds the storable amount")]
    AmountOutOfRange,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::CartNotFound;
        }

        // numeric_value_out_of_range
        if error
            .as_database_error()
            .and_then(|database| database.code())
            .is_some_and(|code| code == "22003")
        {
            return Self::AmountOutOfRange;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
