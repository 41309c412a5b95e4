//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::{
        data::NewAccount,
        errors::AccountsServiceError,
        records::{AccountRecord, AccountUuid},
        repository::PgAccountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_account(
        &self,
        account: AccountUuid,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.repository.get_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(account)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Creates a user or partner account.
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// Retrieve a single account.
    async fn get_account(&self, account: AccountUuid)
    -> Result<AccountRecord, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::accounts::records::AccountRole, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_account_round_trips_role() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = AccountUuid::new();

        let created = ctx
            .accounts
            .create_account(NewAccount {
                uuid,
                name: "Spice Route".to_string(),
                role: AccountRole::Partner,
            })
            .await?;

        let fetched = ctx.accounts.get_account(uuid).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(fetched.role, AccountRole::Partner);
        assert_eq!(fetched.name, "Spice Route");

        Ok(())
    }

    #[tokio::test]
    async fn create_account_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = AccountUuid::new();
        let account = NewAccount {
            uuid,
            name: "Asha".to_string(),
            role: AccountRole::User,
        };

        ctx.accounts.create_account(account.clone()).await?;

        let result = ctx.accounts.create_account(account).await;

        assert!(
            matches!(result, Err(AccountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_account_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.accounts.get_account(AccountUuid::new()).await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
