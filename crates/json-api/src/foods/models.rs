//! Food response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelbite_app::domain::foods::records::{FoodRecord, FoodSummary};

use crate::money::to_f64;

/// A catalog entry as rendered to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Unset for listings created before prices were required
    pub price: Option<f64>,

    /// Public URL of the food's video
    pub video: String,

    pub video_file_id: Option<String>,

    /// The partner that listed the food
    pub food_partner: Uuid,

    pub like_count: i64,
    pub saves_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<FoodRecord> for FoodResponse {
    fn from(food: FoodRecord) -> Self {
        Self {
            id: food.uuid.into(),
            name: food.name,
            description: food.description,
            price: food.price.map(to_f64),
            video: food.video_url,
            video_file_id: food.video_file_id,
            food_partner: food.partner_uuid.into(),
            like_count: food.like_count,
            saves_count: food.saves_count,
            created_at: food.created_at.to_string(),
            updated_at: food.updated_at.to_string(),
        }
    }
}

/// The food shown next to a cart or order line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineFoodResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub video: String,
    pub food_partner: Uuid,
}

impl From<FoodSummary> for LineFoodResponse {
    fn from(food: FoodSummary) -> Self {
        Self {
            id: food.uuid.into(),
            name: food.name,
            description: food.description,
            price: food.price.map(to_f64),
            video: food.video_url,
            food_partner: food.partner_uuid.into(),
        }
    }
}

/// A response carrying only a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// A response carrying a single food.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FoodMessageResponse {
    pub message: String,
    pub food: FoodResponse,
}

impl FoodMessageResponse {
    pub(crate) fn new(message: &str, food: FoodRecord) -> Self {
        Self {
            message: message.to_string(),
            food: food.into(),
        }
    }
}

/// Request body of the like and save toggles.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodIdRequest {
    pub food_id: Uuid,
}
