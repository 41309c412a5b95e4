//! Update Order Status Handler

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

use reelbite_app::domain::orders::records::OrderStatus;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{into_api_error, models::OrderEnvelope},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of confirmed, preparing, ready, delivered, cancelled
    pub status: String,
}

/// Orders cannot be moved back to pending.
fn parse_target_status(status: &str) -> Result<OrderStatus, ApiError> {
    status
        .parse::<OrderStatus>()
        .ok()
        .filter(|status| status.is_partner_settable())
        .ok_or_else(|| ApiError::bad_request("Invalid status"))
}

/// Update Order Status Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the order's food partner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order_id, json, depot),
    fields(
        account_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let order = order_id.into_inner();
    let status = parse_target_status(&json.into_inner().status)?;

    let span = tracing::Span::current();

    span.record("account_uuid", tracing::field::display(actor.uuid));
    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let order = state
        .app
        .orders
        .update_order_status(actor.uuid, order.into(), status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_uuid = %order.uuid, status = %order.status, "updated order status");

    Ok(Json(OrderEnvelope::new(
        order,
        Some("Order status updated successfully"),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use reelbite_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{TEST_PARTNER, orders_services, partner_service};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        partner_service(
            orders_services(orders),
            Router::with_path("orders/{order_id}/status").put(handler),
        )
    }

    #[test]
    fn pending_and_unknown_targets_are_rejected() {
        assert!(parse_target_status("pending").is_err());
        assert!(parse_target_status("shipped").is_err());
        assert_eq!(
            parse_target_status("delivered").ok(),
            Some(OrderStatus::Delivered)
        );
    }

    #[tokio::test]
    async fn test_partner_updates_status() -> TestResult {
        let uuid = OrderUuid::new();

        let mut order = make_order(uuid);

        order.status = OrderStatus::Preparing;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |partner, o, status| {
                *partner == TEST_PARTNER.uuid && *o == uuid && *status == OrderStatus::Preparing
            })
            .return_once(move |_, _, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "preparing" }))
            .send(&make_service(orders))
            .await;

        let body: OrderEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "preparing");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order_status().never();

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "pending" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_partners_order_returns_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "ready" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
