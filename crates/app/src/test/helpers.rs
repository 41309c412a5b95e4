//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            data::NewAccount,
            records::{AccountRole, AccountUuid},
        },
        foods::{
            FoodsService, FoodsServiceError,
            data::NewFood,
            records::{FoodRecord, FoodUuid},
        },
    },
    media::MediaUpload,
    test::TestContext,
};

pub(crate) async fn create_account(
    ctx: &TestContext,
    role: AccountRole,
) -> Result<AccountUuid, AccountsServiceError> {
    let account = ctx
        .accounts
        .create_account(NewAccount {
            uuid: AccountUuid::new(),
            name: format!("Test {role}"),
            role,
        })
        .await?;

    Ok(account.uuid)
}

pub(crate) async fn create_food(
    ctx: &TestContext,
    partner: AccountUuid,
    price: Option<Decimal>,
) -> Result<FoodRecord, FoodsServiceError> {
    let uuid = FoodUuid::new();

    ctx.foods
        .create_food(
            partner,
            NewFood {
                uuid,
                name: "Masala Dosa".to_string(),
                description: "Crisp and golden".to_string(),
                price,
            },
            MediaUpload {
                file_name: uuid.to_string(),
                bytes: b"fake video".to_vec(),
            },
        )
        .await
}
