//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_api_error,
        models::{CartEnvelope, CartResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Accounts without a cart receive an empty one rather than a 404.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(actor.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope::new(
        cart.map_or_else(CartResponse::empty, CartResponse::from),
    )))
}
