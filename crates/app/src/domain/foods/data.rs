//! Food Data

use rust_decimal::Decimal;

use crate::domain::foods::records::FoodUuid;

/// New Food Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub uuid: FoodUuid,
    pub name: String,
    pub description: String,
    pub price: Option<Decimal>,
}

/// Partial update of a food's listing. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}
