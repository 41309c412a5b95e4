//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
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

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub food_id: Uuid,
    pub quantity: i64,
}

/// Add Cart Item Handler
///
/// Adding a food already in the cart replaces its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing price or invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
    skip(json, depot),
    fields(
        account_uuid = tracing::field::Empty,
        food_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();
    let quantity = validate_quantity(request.quantity)?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(actor.uuid));
    span.record("food_uuid", tracing::field::display(request.food_id));
    span.record("quantity", quantity);

    let cart = state
        .app
        .carts
        .add_item(actor.uuid, request.food_id.into(), quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope::with_message(
        cart.into(),
        "Item added to cart successfully",
    )))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use reelbite_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        foods::records::FoodUuid,
    };

    use crate::test_helpers::{TEST_USER, carts_services, user_service};

    use super::{super::tests::make_cart, *};

    fn make_service(carts: MockCartsService) -> Service {
        user_service(
            carts_services(carts),
            Router::with_path("cart/add").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_item_returns_populated_cart() -> TestResult {
        let food = FoodUuid::new();
        let cart = make_cart(&[(food, 2, Decimal::new(10_000, 2))]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |account, f, quantity| {
                *account == TEST_USER.uuid && *f == food && *quantity == 2
            })
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": food.to_string(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success);
        assert_eq!(
            body.message.as_deref(),
            Some("Item added to cart successfully")
        );
        assert_eq!(body.data.items.len(), 1);
        assert!((body.data.total_amount - 200.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_lines_include_food_details() -> TestResult {
        let food = FoodUuid::new();
        let cart = make_cart(&[(food, 1, Decimal::new(24_950, 2))]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": food.to_string(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["data"]["items"][0]["food"]["name"], json!("Paneer Tikka"));
        assert_eq!(body["data"]["items"][0]["food"]["id"], json!(food.to_string()));
        assert_eq!(
            body["data"]["items"][0]["food"]["video"],
            json!("https://media.test/paneer.mp4")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_huge_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": FoodUuid::new().to_string(), "quantity": 3_000_000_000_u64 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], json!("Quantity must be at most 10000"));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": FoodUuid::new().to_string(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Quantity must be at least 1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_food_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::FoodNotFound));

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": FoodUuid::new().to_string(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_without_price_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::PriceNotSet));

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "foodId": FoodUuid::new().to_string(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], json!("Food item price is not set"));

        Ok(())
    }
}
