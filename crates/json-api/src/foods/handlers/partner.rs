//! List Partner Foods Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    foods::{errors::into_api_error, models::FoodResponse},
    state::State,
};

/// Partner Foods Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartnerFoodsResponse {
    pub message: String,
    pub foods: Vec<FoodResponse>,
    pub partner_id: Uuid,
}

/// List Partner Foods Handler
///
/// Foods listed by the calling food partner.
#[endpoint(
    tags("food"),
    summary = "List My Foods",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Foods listed"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a food partner"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PartnerFoodsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let partner = depot.partner_or_403()?;

    let foods = state
        .app
        .foods
        .list_partner_foods(partner.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(PartnerFoodsResponse {
        message: "Partner foods fetched".to_string(),
        foods: foods.into_iter().map(FoodResponse::from).collect(),
        partner_id: partner.uuid.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use reelbite_app::domain::foods::{MockFoodsService, records::FoodUuid};

    use crate::test_helpers::{TEST_PARTNER, foods_services, make_food, partner_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_own_foods() -> TestResult {
        let food = make_food(FoodUuid::new(), TEST_PARTNER.uuid);

        let mut foods = MockFoodsService::new();

        foods
            .expect_list_partner_foods()
            .once()
            .withf(|partner| *partner == TEST_PARTNER.uuid)
            .return_once(move |_| Ok(vec![food]));

        let mut res = TestClient::get("http://example.com/food/partner")
            .send(&partner_service(
                foods_services(foods),
                Router::with_path("food/partner").get(handler),
            ))
            .await;

        let body: PartnerFoodsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.partner_id, TEST_PARTNER.uuid.into_uuid());
        assert_eq!(body.foods.len(), 1);

        Ok(())
    }
}
