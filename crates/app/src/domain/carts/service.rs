//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        carts::{
            errors::CartsServiceError,
            records::{CartItemRecord, CartRecord, cart_total, is_valid_quantity},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        foods::records::FoodUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Reload the cart's lines and store their total.
    async fn persist_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;

        let mut updated = self
            .carts_repository
            .set_total(tx, cart.uuid, cart_total(&items))
            .await?;

        updated.items = items;

        Ok(updated)
    }

    async fn lock_existing_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository
            .lock_cart(tx, account)
            .await?
            .ok_or(CartsServiceError::CartNotFound)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if !is_valid_quantity(quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let price = self
            .items_repository
            .get_food_price(&mut tx, food)
            .await?
            .ok_or(CartsServiceError::FoodNotFound)?
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .ok_or(CartsServiceError::PriceNotSet)?;

        let cart = self
            .carts_repository
            .lock_or_create_cart(&mut tx, account)
            .await?;

        let item = CartItemRecord {
            food_uuid: food,
            quantity,
            price,
            food: None,
        };

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, &item)
            .await?;

        let cart = self.persist_total(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_cart(
        &self,
        account: AccountUuid,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(mut cart) = self.carts_repository.get_cart(&mut tx, account).await? else {
            return Ok(None);
        };

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(Some(cart))
    }

    async fn update_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if !is_valid_quantity(quantity) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.lock_existing_cart(&mut tx, account).await?;

        let rows_affected = self
            .items_repository
            .update_quantity(&mut tx, cart.uuid, food, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let cart = self.persist_total(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_existing_cart(&mut tx, account).await?;

        self.items_repository
            .delete_cart_item(&mut tx, cart.uuid, food)
            .await?;

        let cart = self.persist_total(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, account: AccountUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_existing_cart(&mut tx, account).await?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        let cart = self.persist_total(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Put a food in the account's cart, creating the cart on first use.
    ///
    /// Adding a food that is already in the cart replaces its quantity and
    /// refreshes the captured price.
    async fn add_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve the account's cart, if it has one.
    async fn get_cart(&self, account: AccountUuid)
    -> Result<Option<CartRecord>, CartsServiceError>;

    /// Change the quantity of a line. The captured price is kept.
    async fn update_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a line. Removing a food that is not in the cart is a no-op.
    async fn remove_item(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line.
    async fn clear_cart(&self, account: AccountUuid) -> Result<CartRecord, CartsServiceError>;
}
