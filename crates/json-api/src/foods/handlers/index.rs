//! List Foods Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::FoodResponse},
    state::State,
};

/// Food Catalog Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodItemsResponse {
    pub message: String,
    pub food_items: Vec<FoodResponse>,
}

/// List Foods Handler
///
/// Returns the full catalog.
#[endpoint(
    tags("food"),
    summary = "List Foods",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FoodItemsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.actor_or_401()?;

    let foods = state
        .app
        .foods
        .list_foods()
        .await
        .map_err(into_api_error)?;

    Ok(Json(FoodItemsResponse {
        message: "Food items fetched successfully".to_string(),
        food_items: foods.into_iter().map(FoodResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use reelbite_app::domain::foods::{MockFoodsService, records::FoodUuid};

    use crate::test_helpers::{TEST_PARTNER, foods_services, make_food, user_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_whole_catalog() -> TestResult {
        let first = FoodUuid::new();
        let second = FoodUuid::new();
        let listed = vec![
            make_food(first, TEST_PARTNER.uuid),
            make_food(second, TEST_PARTNER.uuid),
        ];

        let mut foods = MockFoodsService::new();

        foods
            .expect_list_foods()
            .once()
            .return_once(move || Ok(listed));

        let mut res = TestClient::get("http://example.com/food")
            .send(&user_service(
                foods_services(foods),
                Router::with_path("food").get(handler),
            ))
            .await;

        let body: FoodItemsResponse = res.take_json().await?;
        let ids: Vec<_> = body.food_items.iter().map(|food| food.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Food items fetched successfully");
        assert_eq!(ids, vec![first.into_uuid(), second.into_uuid()]);

        Ok(())
    }
}
