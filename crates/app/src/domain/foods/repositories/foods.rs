//! Foods Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    accounts::records::AccountUuid,
    foods::{
        data::{FoodUpdate, NewFood},
        records::{FoodRecord, FoodSummary, FoodUuid},
    },
};

const CREATE_FOOD_SQL: &str = include_str!("../sql/create_food.sql");
const LIST_FOODS_SQL: &str = include_str!("../sql/list_foods.sql");
const LIST_PARTNER_FOODS_SQL: &str = include_str!("../sql/list_partner_foods.sql");
const LIST_SAVED_FOODS_SQL: &str = include_str!("../sql/list_saved_foods.sql");
const GET_FOOD_FOR_UPDATE_SQL: &str = include_str!("../sql/get_food_for_update.sql");
const FOOD_EXISTS_SQL: &str = include_str!("../sql/food_exists.sql");
const UPDATE_FOOD_SQL: &str = include_str!("../sql/update_food.sql");
const DELETE_FOOD_SQL: &str = include_str!("../sql/delete_food.sql");
const REMOVE_FOOD_FROM_CARTS_SQL: &str = include_str!("../sql/remove_food_from_carts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFoodsRepository;

impl PgFoodsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_food(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        partner: AccountUuid,
        food: NewFood,
        video_url: &str,
        video_file_id: &str,
    ) -> Result<FoodRecord, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(CREATE_FOOD_SQL)
            .bind(food.uuid.into_uuid())
            .bind(partner.into_uuid())
            .bind(food.name)
            .bind(food.description)
            .bind(food.price)
            .bind(video_url)
            .bind(video_file_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<FoodRecord>, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(LIST_FOODS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_partner_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        partner: AccountUuid,
    ) -> Result<Vec<FoodRecord>, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(LIST_PARTNER_FOODS_SQL)
            .bind(partner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_saved_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<FoodRecord>, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(LIST_SAVED_FOODS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Load a food and hold its row lock until the transaction ends.
    pub(crate) async fn get_food_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
    ) -> Result<FoodRecord, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(GET_FOOD_FOR_UPDATE_SQL)
            .bind(food.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn food_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(FOOD_EXISTS_SQL)
            .bind(food.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_food(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
        update: FoodUpdate,
    ) -> Result<FoodRecord, sqlx::Error> {
        query_as::<Postgres, FoodRecord>(UPDATE_FOOD_SQL)
            .bind(food.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.price)
            .fetch_one(&mut **tx)
            .await
    }

    /// Drop every cart line pointing at `food` and subtract those lines from
    /// their cart totals.
    pub(crate) async fn remove_food_from_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_FOOD_FROM_CARTS_SQL)
            .bind(food.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_food(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FOOD_SQL)
            .bind(food.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for FoodRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FoodUuid::from_uuid(row.try_get("uuid")?),
            partner_uuid: AccountUuid::from_uuid(row.try_get("partner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            video_url: row.try_get("video_url")?,
            video_file_id: row.try_get("video_file_id")?,
            like_count: row.try_get("like_count")?,
            saves_count: row.try_get("saves_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Reads the `food_*` columns of a `LEFT JOIN foods`. `None` once the food
/// has been deleted.
pub(crate) fn try_get_joined_food(row: &PgRow) -> Result<Option<FoodSummary>, sqlx::Error> {
    let Some(name) = row.try_get::<Option<String>, _>("food_name")? else {
        return Ok(None);
    };

    Ok(Some(FoodSummary {
        uuid: FoodUuid::from_uuid(row.try_get("food_uuid")?),
        partner_uuid: AccountUuid::from_uuid(row.try_get("food_partner_uuid")?),
        name,
        description: row.try_get("food_description")?,
        price: row.try_get("food_price")?,
        video_url: row.try_get("food_video_url")?,
    }))
}
