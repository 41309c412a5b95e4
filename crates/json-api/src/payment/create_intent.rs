//! Create Amount Payment Intent Handler

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, orders::into_api_error, state::State};

/// Create Amount Payment Intent Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAmountIntentRequest {
    /// Amount in major currency units
    pub amount: f64,
}

/// Create Amount Payment Intent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AmountIntentResponse {
    pub client_secret: String,
}

fn parse_amount(amount: f64) -> Result<Decimal, ApiError> {
    Decimal::try_from(amount)
        .map(|amount| {
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        })
        .map_err(|_ignored| ApiError::bad_request("Invalid amount"))
}

/// Create Amount Payment Intent Handler
///
/// Creates a payment intent for an arbitrary positive amount, outside of the
/// cart checkout.
#[endpoint(
    tags("payment"),
    summary = "Create Payment Intent for an Amount",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payment.create_intent",
    skip(json, depot),
    fields(account_uuid = tracing::field::Empty, amount = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAmountIntentRequest>,
    depot: &mut Depot,
) -> Result<Json<AmountIntentResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let amount = parse_amount(json.into_inner().amount)?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(actor.uuid));
    span.record("amount", tracing::field::display(amount));

    let client_secret = state
        .app
        .orders
        .create_amount_payment_intent(actor.uuid, amount)
        .await
        .map_err(into_api_error)?;

    Ok(Json(AmountIntentResponse { client_secret }))
}
