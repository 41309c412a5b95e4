//! List User Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{into_api_error, models::OrdersEnvelope},
    state::State,
};

/// List User Orders Handler
///
/// Orders placed by the caller, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let orders = state
        .app
        .orders
        .list_user_orders(actor.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into()))
}
