//! Order response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelbite_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{foods::models::LineFoodResponse, money::to_f64};

/// An order as rendered to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    /// The account that placed the order
    pub user_id: Uuid,

    /// The food partner fulfilling the order
    pub partner_id: Uuid,

    pub items: Vec<OrderItemResponse>,
    pub total_amount: f64,

    /// One of pending, confirmed, preparing, ready, delivered, cancelled
    pub status: String,

    /// One of pending, completed, failed, refunded
    pub payment_status: String,

    pub payment_id: Option<String>,
    pub delivery_address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into(),
            user_id: order.account_uuid.into(),
            partner_id: order.partner_uuid.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total_amount: to_f64(order.total_amount),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            payment_id: order.payment_id,
            delivery_address: order.delivery_address,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// A line of an order, frozen at checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub food_id: Uuid,
    pub quantity: u32,
    pub price: f64,

    /// Absent once the food has been removed from the catalog
    pub food: Option<LineFoodResponse>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            food_id: item.food_uuid.into(),
            quantity: item.quantity,
            price: to_f64(item.price),
            food: item.food.map(LineFoodResponse::from),
        }
    }
}

/// Envelope wrapping a single order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: OrderResponse,
}

impl OrderEnvelope {
    pub(crate) fn new(order: OrderRecord, message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_string),
            data: order.into(),
        }
    }
}

/// Envelope wrapping a list of orders.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersEnvelope {
    pub success: bool,
    pub data: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersEnvelope {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            success: true,
            data: orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClientSecret {
    pub client_secret: String,
}

/// Envelope wrapping the client secret of a new payment intent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientSecretEnvelope {
    pub success: bool,
    pub data: ClientSecret,
}
