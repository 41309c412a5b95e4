//! Order Data

use rust_decimal::Decimal;

use crate::domain::{
    accounts::records::AccountUuid,
    carts::records::CartRecord,
    orders::records::{OrderItemRecord, OrderStatus, OrderUuid, PaymentStatus},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub account_uuid: AccountUuid,
    pub partner_uuid: AccountUuid,
    pub items: Vec<OrderItemRecord>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_id: String,
    pub delivery_address: Option<String>,
}

impl NewOrder {
    /// Snapshot a paid cart into a pending order.
    ///
    /// The whole order is attributed to `partner`, the owner of the cart's
    /// first line, even when the cart mixes foods from several partners.
    #[must_use]
    pub fn from_paid_cart(
        cart: &CartRecord,
        partner: AccountUuid,
        payment_id: String,
        delivery_address: Option<String>,
    ) -> Self {
        Self {
            uuid: OrderUuid::new(),
            account_uuid: cart.account_uuid,
            partner_uuid: partner,
            items: cart
                .items
                .iter()
                .map(|item| OrderItemRecord {
                    food_uuid: item.food_uuid,
                    quantity: item.quantity,
                    price: item.price,
                    food: item.food.clone(),
                })
                .collect(),
            total_amount: cart.total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Completed,
            payment_id,
            delivery_address,
        }
    }
}
