//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{into_api_error, models::OrderEnvelope},
    state::State,
};

/// Get Order Handler
///
/// Visible to the account that placed the order and to its food partner.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::FORBIDDEN, description = "Not authorized to view this order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .get_order(actor.uuid, order_id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(OrderEnvelope::new(order, None)))
}
