//! Save Food Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{
        errors::into_api_error,
        models::{FoodIdRequest, MessageResponse},
    },
    state::State,
};

/// Save Food Handler
///
/// Toggles the caller's bookmark. Answers 201 when the food becomes saved and
/// 200 when it is unsaved.
#[endpoint(
    tags("food"),
    summary = "Toggle Food Save",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Food saved"),
        (status_code = StatusCode::OK, description = "Food unsaved"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<FoodIdRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let saved = state
        .app
        .foods
        .toggle_save(actor.uuid, json.into_inner().food_id.into())
        .await
        .map_err(into_api_error)?;

    if !saved {
        return Ok(Json(MessageResponse::new("Food unsaved successfully")));
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("Food saved successfully")))
}
