//! Cart Errors

use tracing::error;

use reelbite_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::CartNotFound => ApiError::not_found("Cart not found"),
        CartsServiceError::ItemNotFound => ApiError::not_found("Item not found in cart"),
        CartsServiceError::FoodNotFound | CartsServiceError::InvalidReference => {
            ApiError::not_found("Food item not found")
        }
        CartsServiceError::PriceNotSet => ApiError::bad_request("Food item price is not set"),
        CartsServiceError::InvalidQuantity | CartsServiceError::InvalidData => {
            ApiError::bad_request("Quantity must be at least 1")
        }
        CartsServiceError::AmountOutOfRange => ApiError::bad_request("Cart total is too large"),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal()
        }
    }
}
