//! Delete Food Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::MessageResponse},
    state::State,
};

/// Delete Food Handler
///
/// Removing the video from the media host is best effort and never blocks
/// the deletion.
#[endpoint(
    tags("food"),
    summary = "Delete Food",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Food deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Food belongs to another partner"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
    ),
)]
#[tracing::instrument(
    name = "food.delete",
    skip(id, depot),
    fields(partner_uuid = tracing::field::Empty, food_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let partner = depot.partner_or_403()?;
    let food = id.into_inner();

    let span = tracing::Span::current();

    span.record("partner_uuid", tracing::field::display(partner.uuid));
    span.record("food_uuid", tracing::field::display(food));

    state
        .app
        .foods
        .delete_food(partner.uuid, food.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(food_uuid = %food, "deleted food");

    Ok(Json(MessageResponse::new("Food deleted successfully")))
}
