//! Cart response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelbite_app::domain::carts::records::{
    CartItemRecord, CartRecord, MAX_LINE_QUANTITY, is_valid_quantity,
};

use crate::{errors::ApiError, foods::models::LineFoodResponse, money::to_f64};

/// A cart as rendered to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// Cart identifier, absent for the empty placeholder cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Cart lines in the order they were added
    pub items: Vec<CartItemResponse>,

    /// Sum of price times quantity over every line
    pub total_amount: f64,
}

impl CartResponse {
    /// The shape returned when the account has no cart or it was cleared.
    pub(crate) fn empty() -> Self {
        Self {
            id: None,
            items: Vec::new(),
            total_amount: 0.0,
        }
    }
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            id: Some(cart.uuid.into()),
            total_amount: to_f64(cart.total_amount),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

/// A single cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub food_id: Uuid,
    pub quantity: u32,

    /// Unit price captured when the line was added
    pub price: f64,

    /// Current details of the food on this line
    pub food: Option<LineFoodResponse>,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            food_id: item.food_uuid.into(),
            quantity: item.quantity,
            price: to_f64(item.price),
            food: item.food.map(LineFoodResponse::from),
        }
    }
}

/// Envelope wrapping a cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: CartResponse,
}

impl CartEnvelope {
    pub(crate) fn new(data: CartResponse) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub(crate) fn with_message(data: CartResponse, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}

pub(crate) fn validate_quantity(quantity: i64) -> Result<u32, ApiError> {
    if quantity < 1 {
        return Err(ApiError::bad_request("Quantity must be at least 1"));
    }

    u32::try_from(quantity)
        .ok()
        .filter(|quantity| is_valid_quantity(*quantity))
        .ok_or_else(|| {
            ApiError::bad_request(format!("Quantity must be at most {MAX_LINE_QUANTITY}"))
        })
}
