//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartEnvelope},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing a food that is not in the cart succeeds and returns the cart as is.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    food_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(actor.uuid, food_id.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope::new(cart.into())))
}
