//! Food Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Food UUID
pub type FoodUuid = TypedUuid<FoodRecord>;

/// Food Record
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub uuid: FoodUuid,
    pub partner_uuid: AccountUuid,
    pub name: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub video_url: String,
    pub video_file_id: Option<String>,
    pub like_count: i64,
    pub saves_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The food fields shown next to a cart or order line.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSummary {
    pub uuid: FoodUuid,
    pub partner_uuid: AccountUuid,
    pub name: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub video_url: String,
}

impl From<&FoodRecord> for FoodSummary {
    fn from(food: &FoodRecord) -> Self {
        Self {
            uuid: food.uuid,
            partner_uuid: food.partner_uuid,
            name: food.name.clone(),
            description: food.description.clone(),
            price: food.price,
            video_url: food.video_url.clone(),
        }
    }
}

impl FoodRecord {
    #[must_use]
    pub fn is_owned_by(&self, partner: AccountUuid) -> bool {
        self.partner_uuid == partner
    }
}
