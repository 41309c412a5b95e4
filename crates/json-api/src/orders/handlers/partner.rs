//! List Partner Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{into_api_error, models::OrdersEnvelope},
    state::State,
};

/// List Partner Orders Handler
///
/// Orders fulfilled by the calling food partner, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Partner Orders",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a food partner"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let partner = depot.partner_or_403()?;

    let orders = state
        .app
        .orders
        .list_partner_orders(partner.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into()))
}
