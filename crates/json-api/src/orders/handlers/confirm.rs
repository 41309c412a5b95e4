//! Confirm Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{into_api_error, models::OrderEnvelope},
    state::State,
};

/// Confirm Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmOrderRequest {
    pub payment_intent_id: String,

    #[serde(default)]
    pub address_id: Option<String>,
}

/// Confirm Order Handler
///
/// Turns the caller's cart into an order once its payment has succeeded.
#[endpoint(
    tags("orders"),
    summary = "Confirm Order",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payment not completed or cart empty"),
        (status_code = StatusCode::CONFLICT, description = "Payment already used for an order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.confirm",
    skip(json, depot),
    fields(
        account_uuid = tracing::field::Empty,
        payment_intent_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ConfirmOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    let payment_intent_id = request.payment_intent_id.trim().to_string();

    if payment_intent_id.is_empty() {
        return Err(ApiError::bad_request("Payment intent ID is required"));
    }

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(actor.uuid));
    span.record("payment_intent_id", payment_intent_id.as_str());

    let order = state
        .app
        .orders
        .confirm_order(actor.uuid, payment_intent_id, request.address_id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(OrderEnvelope::new(
        order,
        Some("Order placed successfully"),
    )))
}
