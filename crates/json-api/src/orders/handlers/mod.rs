//! Order Handlers

pub(crate) mod confirm;
pub(crate) mod create_payment_intent;
pub(crate) mod get;
pub(crate) mod partner;
pub(crate) mod status;
pub(crate) mod user;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use reelbite_app::domain::{
        foods::records::FoodUuid,
        orders::records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
    };

    use crate::test_helpers::{TEST_PARTNER, TEST_USER, make_line_food};

    pub(super) fn make_order(uuid: OrderUuid) -> OrderRecord {
        let food = FoodUuid::new();

        OrderRecord {
            uuid,
            account_uuid: TEST_USER.uuid,
            partner_uuid: TEST_PARTNER.uuid,
            items: vec![OrderItemRecord {
                food_uuid: food,
                quantity: 2,
                price: Decimal::new(15_000, 2),
                food: Some(make_line_food(food)),
            }],
            total_amount: Decimal::new(30_000, 2),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Completed,
            payment_id: Some("pi_123".to_string()),
            delivery_address: Some("addr_home".to_string()),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
