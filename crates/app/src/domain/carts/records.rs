//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        accounts::records::AccountUuid,
        foods::records::{FoodSummary, FoodUuid},
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub account_uuid: AccountUuid,
    pub items: Vec<CartItemRecord>,
    pub total_amount: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Largest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// Whether `quantity` fits a cart line.
#[must_use]
pub fn is_valid_quantity(quantity: u32) -> bool {
    (1..=MAX_LINE_QUANTITY).contains(&quantity)
}

/// A cart line. `price` is the food's price when the line was last added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
    pub price: Decimal,
    /// Current food details, filled in when lines are read back.
    pub food: Option<FoodSummary>,
}

impl CartItemRecord {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Sum of `price × quantity` over every line.
#[must_use]
pub fn cart_total(items: &[CartItemRecord]) -> Decimal {
    items.iter().map(CartItemRecord::line_total).sum()
}
