//! Order Errors

use tracing::error;

use reelbite_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::Forbidden => ApiError::forbidden("Not authorized to access this order"),
        OrdersServiceError::CartEmpty => ApiError::bad_request("Cart is empty"),
        OrdersServiceError::PaymentIncomplete => ApiError::bad_request("Payment not completed"),
        OrdersServiceError::InvalidAmount => ApiError::bad_request("Invalid amount"),
        OrdersServiceError::AlreadyExists => {
            ApiError::conflict("An order already exists for this payment")
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            ApiError::bad_request("Invalid order data")
        }
        OrdersServiceError::Gateway(source) => {
            error!("payment gateway failure: {source}");

            ApiError::internal()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            ApiError::internal()
        }
    }
}
