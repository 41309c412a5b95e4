//! Create Checkout Payment Intent Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{
        into_api_error,
        models::{ClientSecret, ClientSecretEnvelope},
    },
    state::State,
};

/// Create Payment Intent Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentIntentRequest {
    /// Delivery address recorded on the intent
    #[serde(default)]
    pub address_id: Option<String>,
}

/// Create Payment Intent Handler
///
/// Starts checkout for the caller's cart. No order is created until the
/// payment is confirmed.
#[endpoint(
    tags("orders"),
    summary = "Create Checkout Payment Intent",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create_payment_intent",
    skip(json, depot),
    fields(account_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentIntentRequest>,
    depot: &mut Depot,
) -> Result<Json<ClientSecretEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    tracing::Span::current().record("account_uuid", tracing::field::display(actor.uuid));

    let client_secret = state
        .app
        .orders
        .create_payment_intent(actor.uuid, json.into_inner().address_id)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ClientSecretEnvelope {
        success: true,
        data: ClientSecret { client_secret },
    }))
}
