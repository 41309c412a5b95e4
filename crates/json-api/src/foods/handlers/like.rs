//! Like Food Handler

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

/// Like Food Handler
///
/// Toggles the caller's like. Answers 201 when the food becomes liked and
/// 200 when the like is removed.
#[endpoint(
    tags("food"),
    summary = "Toggle Food Like",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Food liked"),
        (status_code = StatusCode::OK, description = "Food unliked"),
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

    let liked = state
        .app
        .foods
        .toggle_like(actor.uuid, json.into_inner().food_id.into())
        .await
        .map_err(into_api_error)?;

    if liked {
        res.status_code(StatusCode::CREATED);

        Ok(Json(MessageResponse::new("Food liked successfully")))
    } else {
        Ok(Json(MessageResponse::new("Food unliked successfully")))
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use reelbite_app::domain::foods::{FoodsServiceError, MockFoodsService, records::FoodUuid};

    use crate::test_helpers::{TEST_USER, foods_services, user_service};

    use super::*;

    fn make_service(foods: MockFoodsService) -> Service {
        user_service(
            foods_services(foods),
            Router::with_path("food/like").post(handler),
        )
    }

    #[tokio::test]
    async fn test_first_like_returns_201() -> TestResult {
        let food = FoodUuid::new();

        let mut foods = MockFoodsService::new();

        foods
            .expect_toggle_like()
            .once()
            .withf(move |account, f| *account == TEST_USER.uuid && *f == food)
            .return_once(|_, _| Ok(true));

        let mut res = TestClient::post("http://example.com/food/like")
            .json(&json!({ "foodId": food.to_string() }))
            .send(&make_service(foods))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "Food liked successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_second_like_returns_200() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods
            .expect_toggle_like()
            .once()
            .return_once(|_, _| Ok(false));

        let mut res = TestClient::post("http://example.com/food/like")
            .json(&json!({ "foodId": FoodUuid::new().to_string() }))
            .send(&make_service(foods))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Food unliked successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_food_returns_404() -> TestResult {
        let mut foods = MockFoodsService::new();

        foods
            .expect_toggle_like()
            .once()
            .return_once(|_, _| Err(FoodsServiceError::NotFound));

        let res = TestClient::post("http://example.com/food/like")
            .json(&json!({ "foodId": FoodUuid::new().to_string() }))
            .send(&make_service(foods))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
