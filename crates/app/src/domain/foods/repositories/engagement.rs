//! Likes and saves.

use sqlx::{Postgres, Transaction, query};

use crate::domain::{accounts::records::AccountUuid, foods::records::FoodUuid};

/// A per-user boolean interaction with a food, backed by a join table and a
/// counter column on `foods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Engagement {
    Like,
    Save,
}

impl Engagement {
    const fn delete_sql(self) -> &'static str {
        match self {
            Self::Like => include_str!("../sql/delete_like.sql"),
            Self::Save => include_str!("../sql/delete_save.sql"),
        }
    }

    const fn insert_sql(self) -> &'static str {
        match self {
            Self::Like => include_str!("../sql/insert_like.sql"),
            Self::Save => include_str!("../sql/insert_save.sql"),
        }
    }

    const fn adjust_count_sql(self) -> &'static str {
        match self {
            Self::Like => include_str!("../sql/adjust_like_count.sql"),
            Self::Save => include_str!("../sql/adjust_saves_count.sql"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEngagementRepository;

impl PgEngagementRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Flip the interaction and move the food's counter by one in the same
    /// direction. Returns whether the interaction is now active.
    pub(crate) async fn toggle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        engagement: Engagement,
        account: AccountUuid,
        food: FoodUuid,
    ) -> Result<bool, sqlx::Error> {
        let removed = query(engagement.delete_sql())
            .bind(account.into_uuid())
            .bind(food.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if removed > 0 {
            self.adjust_count(tx, engagement, food, -1).await?;

            return Ok(false);
        }

        let inserted = query(engagement.insert_sql())
            .bind(account.into_uuid())
            .bind(food.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        // A concurrent toggle already inserted the row and bumped the counter.
        if inserted > 0 {
            self.adjust_count(tx, engagement, food, 1).await?;
        }

        Ok(true)
    }

    async fn adjust_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        engagement: Engagement,
        food: FoodUuid,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        query(engagement.adjust_count_sql())
            .bind(food.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
