//! List Saved Foods Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::FoodResponse},
    state::State,
};

/// Saved Foods Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SavedFoodsResponse {
    pub message: String,
    pub saved_foods: Vec<FoodResponse>,
}

/// List Saved Foods Handler
///
/// Answers 404 when the caller has not saved anything.
#[endpoint(
    tags("food"),
    summary = "List Saved Foods",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Saved foods listed"),
        (status_code = StatusCode::NOT_FOUND, description = "No saved foods found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SavedFoodsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let saved = state
        .app
        .foods
        .list_saved_foods(actor.uuid)
        .await
        .map_err(into_api_error)?;

    if saved.is_empty() {
        return Err(ApiError::not_found("No saved foods found"));
    }

    Ok(Json(SavedFoodsResponse {
        message: "Saved foods retrieved successfully".to_string(),
        saved_foods: saved.into_iter().map(FoodResponse::from).collect(),
    }))
}
