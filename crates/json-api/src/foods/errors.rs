//! Food Errors

use tracing::error;

use reelbite_app::domain::foods::FoodsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: FoodsServiceError) -> ApiError {
    match error {
        FoodsServiceError::NotFound => ApiError::not_found("Food not found"),
        FoodsServiceError::Forbidden => ApiError::forbidden("Not authorized to modify this food"),
        FoodsServiceError::AlreadyExists => ApiError::conflict("Food already exists"),
        FoodsServiceError::InvalidReference
        | FoodsServiceError::MissingRequiredData
        | FoodsServiceError::InvalidData => ApiError::bad_request("Invalid food data"),
        FoodsServiceError::Media(source) => {
            error!("media storage failure: {source}");

            ApiError::internal()
        }
        FoodsServiceError::Sql(source) => {
            error!("food storage failure: {source}");

            ApiError::internal()
        }
    }
}
