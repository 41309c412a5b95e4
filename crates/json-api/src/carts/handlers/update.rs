//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_api_error,
        models::{CartEnvelope, validate_quantity},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item Quantity",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
    ),
)]
#[tracing::instrument(
    name = "cart.update",
    skip(food_id, json, depot),
    fields(account_uuid = tracing::field::Empty, food_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    food_id: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let food = food_id.into_inner();
    let quantity = validate_quantity(json.into_inner().quantity)?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(actor.uuid));
    span.record("food_uuid", tracing::field::display(food));

    let cart = state
        .app
        .carts
        .update_item(actor.uuid, food.into(), quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope::new(cart.into())))
}
