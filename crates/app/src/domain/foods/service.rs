//! Foods service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        foods::{
            data::{FoodUpdate, NewFood},
            errors::FoodsServiceError,
            records::{FoodRecord, FoodUuid},
            repositories::{Engagement, PgEngagementRepository, PgFoodsRepository},
        },
    },
    media::{MediaStorage, MediaUpload},
};

#[derive(Clone)]
pub struct PgFoodsService {
    db: Db,
    media: Arc<dyn MediaStorage>,
    foods_repository: PgFoodsRepository,
    engagement_repository: PgEngagementRepository,
}

impl std::fmt::Debug for PgFoodsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgFoodsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgFoodsService {
    #[must_use]
    pub fn new(db: Db, media: Arc<dyn MediaStorage>) -> Self {
        Self {
            db,
            media,
            foods_repository: PgFoodsRepository::new(),
            engagement_repository: PgEngagementRepository::new(),
        }
    }

    async fn toggle(
        &self,
        engagement: Engagement,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.foods_repository.food_exists(&mut tx, food).await? {
            return Err(FoodsServiceError::NotFound);
        }

        let active = self
            .engagement_repository
            .toggle(&mut tx, engagement, account, food)
            .await?;

        tx.commit().await?;

        Ok(active)
    }
}

#[async_trait]
impl FoodsService for PgFoodsService {
    async fn create_food(
        &self,
        partner: AccountUuid,
        food: NewFood,
        video: MediaUpload,
    ) -> Result<FoodRecord, FoodsServiceError> {
        let stored = self.media.upload(video).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .foods_repository
            .create_food(&mut tx, partner, food, &stored.url, &stored.file_id)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_foods(&self) -> Result<Vec<FoodRecord>, FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let foods = self.foods_repository.list_foods(&mut tx).await?;

        tx.commit().await?;

        Ok(foods)
    }

    async fn list_partner_foods(
        &self,
        partner: AccountUuid,
    ) -> Result<Vec<FoodRecord>, FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let foods = self
            .foods_repository
            .list_partner_foods(&mut tx, partner)
            .await?;

        tx.commit().await?;

        Ok(foods)
    }

    async fn update_food(
        &self,
        partner: AccountUuid,
        food: FoodUuid,
        update: FoodUpdate,
    ) -> Result<FoodRecord, FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.foods_repository.get_food_for_update(&mut tx, food).await?;

        if !existing.is_owned_by(partner) {
            return Err(FoodsServiceError::Forbidden);
        }

        let updated = self
            .foods_repository
            .update_food(&mut tx, food, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_food(
        &self,
        partner: AccountUuid,
        food: FoodUuid,
    ) -> Result<(), FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.foods_repository.get_food_for_update(&mut tx, food).await?;

        if !existing.is_owned_by(partner) {
            return Err(FoodsServiceError::Forbidden);
        }

        self.foods_repository
            .remove_food_from_carts(&mut tx, food)
            .await?;

        self.foods_repository.delete_food(&mut tx, food).await?;

        tx.commit().await?;

        // The media host is only called once the row lock is released.
        if let Some(file_id) = existing.video_file_id.as_deref()
            && let Err(error) = self.media.delete(file_id).await
        {
            warn!(
                food_uuid = %food,
                file_id,
                error = %error,
                "failed to delete food media after removing its record"
            );
        }

        Ok(())
    }

    async fn toggle_like(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, FoodsServiceError> {
        self.toggle(Engagement::Like, account, food).await
    }

    async fn toggle_save(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, FoodsServiceError> {
        self.toggle(Engagement::Save, account, food).await
    }

    async fn list_saved_foods(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<FoodRecord>, FoodsServiceError> {
        let mut tx = self.db.begin().await?;

        let foods = self
            .foods_repository
            .list_saved_foods(&mut tx, account)
            .await?;

        tx.commit().await?;

        Ok(foods)
    }
}

#[automock]
#[async_trait]
pub trait FoodsService: Send + Sync {
    /// Upload the food's video, then persist the food pointing at it.
    ///
    /// Nothing is written when the upload fails.
    async fn create_food(
        &self,
        partner: AccountUuid,
        food: NewFood,
        video: MediaUpload,
    ) -> Result<FoodRecord, FoodsServiceError>;

    /// The full catalog, newest first.
    async fn list_foods(&self) -> Result<Vec<FoodRecord>, FoodsServiceError>;

    /// Foods listed by a single partner.
    async fn list_partner_foods(
        &self,
        partner: AccountUuid,
    ) -> Result<Vec<FoodRecord>, FoodsServiceError>;

    /// Update a food owned by `partner`.
    async fn update_food(
        &self,
        partner: AccountUuid,
        food: FoodUuid,
        update: FoodUpdate,
    ) -> Result<FoodRecord, FoodsServiceError>;

    /// Delete a food owned by `partner`.
    ///
    /// Media deletion is best effort. Cart lines referencing the food are
    /// removed and their cart totals adjusted in the same transaction.
    async fn delete_food(&self, partner: AccountUuid, food: FoodUuid)
    -> Result<(), FoodsServiceError>;

    /// Like or unlike a food. Returns `true` when the food is now liked.
    async fn toggle_like(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, FoodsServiceError>;

    /// Save or unsave a food. Returns `true` when the food is now saved.
    async fn toggle_save(
        &self,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, FoodsServiceError>;

    /// Foods saved by `account`, most recently saved first.
    async fn list_saved_foods(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<FoodRecord>, FoodsServiceError>;
}
