//! Order Items Repository

use std::collections::HashMap;

use sqlx::{Postgres, Row, Transaction, postgres::PgRow, query};
use uuid::Uuid;

use crate::domain::{
    carts::repositories::try_get_quantity,
    foods::{records::FoodUuid, repositories::try_get_joined_food},
    orders::records::{OrderItemRecord, OrderRecord, OrderUuid},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: &[OrderItemRecord],
    ) -> Result<(), sqlx::Error> {
        for (position, item) in items.iter().enumerate() {
            let position =
                i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let quantity =
                i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order.into_uuid())
                .bind(position)
                .bind(item.food_uuid.into_uuid())
                .bind(quantity)
                .bind(item.price)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// Fill in the lines of every given order with one query.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: HashMap<Uuid, Vec<OrderItemRecord>> = HashMap::new();

        for row in &rows {
            let order_uuid: Uuid = row.try_get("order_uuid")?;

            by_order
                .entry(order_uuid)
                .or_default()
                .push(order_item_from_row(row)?);
        }

        for order in orders {
            order.items = by_order.remove(&order.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(())
    }
}

fn order_item_from_row(row: &PgRow) -> Result<OrderItemRecord, sqlx::Error> {
    Ok(OrderItemRecord {
        food_uuid: FoodUuid::from_uuid(row.try_get("food_uuid")?),
        quantity: try_get_quantity(row, "quantity")?,
        price: row.try_get("price")?,
        food: try_get_joined_food(row)?,
    })
}
