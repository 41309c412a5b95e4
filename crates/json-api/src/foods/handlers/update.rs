//! Update Food Handler

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelbite_app::domain::foods::data::FoodUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::FoodMessageResponse},
    state::State,
};

/// Update Food Request
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateFoodRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,
}

impl TryFrom<UpdateFoodRequest> for FoodUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateFoodRequest) -> Result<Self, Self::Error> {
        let price = request
            .price
            .map(|price| {
                Decimal::try_from(price)
                    .map(|price| price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
                    .map_err(|_ignored| ApiError::bad_request("Invalid price"))
            })
            .transpose()?;

        Ok(FoodUpdate {
            name: request.name,
            description: request.description,
            price,
        })
    }
}

/// Update Food Handler
#[endpoint(
    tags("food"),
    summary = "Update Food",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Food updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid price"),
        (status_code = StatusCode::FORBIDDEN, description = "Food belongs to another partner"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
    ),
)]
#[tracing::instrument(
    name = "food.update",
    skip(id, json, depot),
    fields(partner_uuid = tracing::field::Empty, food_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateFoodRequest>,
    depot: &mut Depot,
) -> Result<Json<FoodMessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let partner = depot.partner_or_403()?;
    let food = id.into_inner();
    let update = FoodUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("partner_uuid", tracing::field::display(partner.uuid));
    span.record("food_uuid", tracing::field::display(food));

    let food = state
        .app
        .foods
        .update_food(partner.uuid, food.into(), update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(FoodMessageResponse::new("Food updated", food)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use reelbite_app::domain::foods::{FoodsServiceError, MockFoodsService, records::FoodUuid};

    use crate::test_helpers::{TEST_PARTNER, foods_services, make_food, partner_service};

    use super::*;

    fn make_service(foods: MockFoodsService) -> Service {
        partner_service(
            foods_services(foods),
            Router::with_path("food/{id}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_partial_update_passes_only_given_fields() -> TestResult {
        let uuid = FoodUuid::new();

        let mut food = make_food(uuid, TEST_PARTNER.uuid);

        food.price = Some(Decimal::new(19_900, 2));

        let mut foods = MockFoodsService::new();

        foods
            .expect_update_food()
            .once()
            .withf(move |partner, f, update| {
                *partner == TEST_PARTNER.uuid
                    && *f == uuid
                    && *update
                        == FoodUpdate {
                            name: None,
                            description: None,
                            price: Some(Decimal::new(19_900, 2)),
                        }
            })
            .return_once(move |_, _, _| Ok(food));

        let mut res = TestClient::patch(format!("http://example.com/food/{uuid}"))
            .json(&json!({ "price": 199 }))
            .send(&make_service(foods))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["message"], json!("Food updated"));
        assert_eq!(body["food"]["price"], json!(199.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_partners_food_returns_403() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods
            .expect_update_food()
            .once()
            .return_once(|_, _, _| Err(FoodsServiceError::Forbidden));

        let res = TestClient::patch(format!("http://example.com/food/{}", FoodUuid::new()))
            .json(&json!({ "name": "Stolen" }))
            .send(&make_service(foods))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
