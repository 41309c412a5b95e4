//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        carts::{
            records::CartRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
    },
    payments::{
        IntentKind, IntentMetadata, NewPaymentIntent, PaymentGateway, PaymentGatewayError,
        PaymentIntent, to_minor_units,
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    orders_repository: PgOrdersRepository,
    order_items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            db,
            gateway,
            orders_repository: PgOrdersRepository::new(),
            order_items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn request_intent(
        &self,
        amount: Decimal,
        kind: IntentKind,
        metadata: IntentMetadata,
    ) -> Result<String, OrdersServiceError> {
        let amount = to_minor_units(amount).ok_or(OrdersServiceError::InvalidAmount)?;

        let intent = self
            .gateway
            .create_intent(NewPaymentIntent {
                amount,
                kind,
                metadata,
            })
            .await?;

        client_secret(intent)
    }
}

fn client_secret(intent: PaymentIntent) -> Result<String, OrdersServiceError> {
    intent.client_secret.ok_or_else(|| {
        OrdersServiceError::Gateway(PaymentGatewayError::UnexpectedResponse(format!(
            "payment intent {} has no client secret",
            intent.id
        )))
    })
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_payment_intent(
        &self,
        account: AccountUuid,
        address_id: Option<String>,
    ) -> Result<String, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart(&mut tx, account).await?;

        let Some(mut cart) = cart else {
            return Err(OrdersServiceError::CartEmpty);
        };

        cart.items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::CartEmpty);
        }

        self.request_intent(
            cart.total_amount,
            IntentKind::Checkout,
            IntentMetadata {
                user_id: account.to_string(),
                cart_id: Some(cart.uuid.to_string()),
                address_id,
            },
        )
        .await
    }

    async fn create_amount_payment_intent(
        &self,
        account: AccountUuid,
        amount: Decimal,
    ) -> Result<String, OrdersServiceError> {
        if amount <= Decimal::ZERO {
            return Err(OrdersServiceError::InvalidAmount);
        }

        self.request_intent(
            amount,
            IntentKind::Amount,
            IntentMetadata {
                user_id: account.to_string(),
                ..IntentMetadata::default()
            },
        )
        .await
    }

    async fn confirm_order(
        &self,
        account: AccountUuid,
        payment_intent_id: String,
        address_id: Option<String>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let intent = self.gateway.retrieve_intent(&payment_intent_id).await?;

        if !intent.is_succeeded() {
            return Err(OrdersServiceError::PaymentIncomplete);
        }

        let mut tx = self.db.begin().await?;

        let Some(mut cart) = self.carts_repository.lock_cart(&mut tx, account).await? else {
            return Err(OrdersServiceError::CartEmpty);
        };

        cart.items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let partner = first_line_partner(&cart, &self.orders_repository, &mut tx).await?;

        let new_order = NewOrder::from_paid_cart(&cart, partner, intent.id, address_id);

        let mut order = self
            .orders_repository
            .create_order(&mut tx, &new_order)
            .await?;

        self.order_items_repository
            .create_order_items(&mut tx, order.uuid, &new_order.items)
            .await?;

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository
            .set_total(&mut tx, cart.uuid, Decimal::ZERO)
            .await?;

        tx.commit().await?;

        order.items = new_order.items;

        info!(
            order_uuid = %order.uuid,
            account_uuid = %account,
            total_amount = %order.total_amount,
            "order confirmed"
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        if !order.is_visible_to(account) {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut orders = [order];

        self.order_items_repository
            .attach_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        let [order] = orders;

        Ok(order)
    }

    async fn update_order_status(
        &self,
        partner: AccountUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .orders_repository
            .get_order_for_update(&mut tx, order)
            .await?;

        if existing.partner_uuid != partner {
            return Err(OrdersServiceError::Forbidden);
        }

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        let mut orders = [updated];

        self.order_items_repository
            .attach_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        let [updated] = orders;

        Ok(updated)
    }

    async fn list_user_orders(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_account_orders(&mut tx, account)
            .await?;

        self.order_items_repository
            .attach_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_partner_orders(
        &self,
        partner: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_partner_orders(&mut tx, partner)
            .await?;

        self.order_items_repository
            .attach_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }
}

async fn first_line_partner(
    cart: &CartRecord,
    repository: &PgOrdersRepository,
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> Result<AccountUuid, OrdersServiceError> {
    let first = cart.items.first().ok_or(OrdersServiceError::CartEmpty)?;

    repository
        .get_food_partner(tx, first.food_uuid)
        .await?
        .ok_or(OrdersServiceError::InvalidReference)
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Start checkout for the account's cart, returning the client secret of
    /// a new payment intent. No order is created.
    async fn create_payment_intent(
        &self,
        account: AccountUuid,
        address_id: Option<String>,
    ) -> Result<String, OrdersServiceError>;

    /// Create a payment intent for an arbitrary positive amount.
    async fn create_amount_payment_intent(
        &self,
        account: AccountUuid,
        amount: Decimal,
    ) -> Result<String, OrdersServiceError>;

    /// Turn the cart into an order once its payment intent has succeeded,
    /// emptying the cart in the same transaction.
    async fn confirm_order(
        &self,
        account: AccountUuid,
        payment_intent_id: String,
        address_id: Option<String>,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order placed or fulfilled by `account`.
    async fn get_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Set the status of an order fulfilled by `partner`.
    async fn update_order_status(
        &self,
        partner: AccountUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by `account`, newest first.
    async fn list_user_orders(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders fulfilled by `partner`, newest first.
    async fn list_partner_orders(
        &self,
        partner: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;
    use testresult::TestResult;

    use crate::{
        domain::{accounts::records::AccountRole, carts::CartsService},
        payments::{MockPaymentGateway, PaymentIntentStatus},
        test::{
            TestContext,
            helpers::{create_account, create_food},
        },
    };

    use super::*;

    fn intent(id: &str, status: PaymentIntentStatus) -> PaymentIntent {
        PaymentIntent {
            id: id.to_string(),
            status,
            client_secret: Some(format!("{id}_secret")),
        }
    }

    fn offline_service(gateway: MockPaymentGateway) -> TestResult<PgOrdersService> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unreachable")?;

        Ok(PgOrdersService::new(Db::new(pool), Arc::new(gateway)))
    }

    #[tokio::test]
    async fn confirm_with_unfinished_payment_never_touches_storage() -> TestResult {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_retrieve_intent()
            .once()
            .withf(|id| id.to_string() == "pi_pending")
            .return_once(|id| Ok(intent(id, PaymentIntentStatus::RequiresPaymentMethod)));

        let service = offline_service(gateway)?;

        let result = service
            .confirm_order(AccountUuid::new(), "pi_pending".to_string(), None)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::PaymentIncomplete)),
            "expected PaymentIncomplete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn amount_intent_rejects_non_positive_amounts() -> TestResult {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_intent().never();

        let service = offline_service(gateway)?;

        for amount in [Decimal::ZERO, Decimal::NEGATIVE_ONE] {
            let result = service
                .create_amount_payment_intent(AccountUuid::new(), amount)
                .await;

            assert!(
                matches!(result, Err(OrdersServiceError::InvalidAmount)),
                "expected InvalidAmount, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn amount_intent_sends_minor_units_and_user_metadata() -> TestResult {
        let account = AccountUuid::new();
        let expected_user = account.to_string();

        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_create_intent()
            .once()
            .withf(move |intent| {
                intent.amount == 12_550
                    && intent.kind == IntentKind::Amount
                    && intent.metadata.user_id == expected_user
                    && intent.metadata.cart_id.is_none()
            })
            .return_once(|_| Ok(intent("pi_amount", PaymentIntentStatus::RequiresPaymentMethod)));

        let service = offline_service(gateway)?;

        let secret = service
            .create_amount_payment_intent(account, Decimal::new(12_550, 2))
            .await?;

        assert_eq!(secret, "pi_amount_secret");

        Ok(())
    }

    #[test]
    fn intent_without_client_secret_is_a_gateway_error() {
        let result = client_secret(PaymentIntent {
            id: "pi_1".to_string(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            client_secret: None,
        });

        assert!(
            matches!(result, Err(OrdersServiceError::Gateway(_))),
            "expected Gateway, got {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_cart_cannot_start_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_account(&ctx, AccountRole::User).await?;

        let result = ctx.orders.create_payment_intent(user, None).await;

        assert!(
            matches!(result, Err(OrdersServiceError::CartEmpty)),
            "expected CartEmpty, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_creates_order_and_empties_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = create_account(&ctx, AccountRole::Partner).await?;
        let user = create_account(&ctx, AccountRole::User).await?;
        let food = create_food(&ctx, partner, Some(Decimal::new(10_000, 2))).await?;

        ctx.carts.add_item(user, food.uuid, 3).await?;

        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_create_intent()
            .once()
            .withf(|intent| intent.amount == 30_000 && intent.kind == IntentKind::Checkout)
            .return_once(|_| Ok(intent("pi_ok", PaymentIntentStatus::RequiresPaymentMethod)));

        gateway
            .expect_retrieve_intent()
            .once()
            .return_once(|id| Ok(intent(id, PaymentIntentStatus::Succeeded)));

        let orders = ctx.orders_with_gateway(gateway);

        let secret = orders
            .create_payment_intent(user, Some("addr-1".to_string()))
            .await?;
        assert_eq!(secret, "pi_ok_secret");

        let order = orders
            .confirm_order(user, "pi_ok".to_string(), Some("addr-1".to_string()))
            .await?;

        assert_eq!(order.total_amount, Decimal::new(30_000, 2));
        assert_eq!(order.partner_uuid, partner);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_id.as_deref(), Some("pi_ok"));
        assert_eq!(order.items.len(), 1);

        let cart = ctx.carts.get_cart(user).await?.ok_or("cart missing")?;
        assert!(cart.is_empty());
        assert_eq!(cart.total_amount, Decimal::ZERO);

        let listed = orders.list_user_orders(user).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].items, order.items);

        Ok(())
    }

    #[tokio::test]
    async fn confirming_same_intent_twice_does_not_duplicate_order() -> TestResult {
        let ctx = TestContext::new().await;
        let partner = create_account(&ctx, AccountRole::Partner).await?;
        let user = create_account(&ctx, AccountRole::User).await?;
        let food = create_food(&ctx, partner, Some(Decimal::ONE)).await?;

        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_retrieve_intent()
            .times(2)
            .returning(|id| Ok(intent(id, PaymentIntentStatus::Succeeded)));

        let orders = ctx.orders_with_gateway(gateway);

        ctx.carts.add_item(user, food.uuid, 1).await?;
        orders.confirm_order(user, "pi_dup".to_string(), None).await?;

        ctx.carts.add_item(user, food.uuid, 1).await?;
        let result = orders.confirm_order(user, "pi_dup".to_string(), None).await;

        assert!(
            matches!(result, Err(OrdersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user).await?.ok_or("cart missing")?;
        assert_eq!(cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn only_the_fulfilling_partner_can_update_status() -> TestResult {
        let ctx = TestContext::new().await;
        let partner_a = create_account(&ctx, AccountRole::Partner).await?;
        let partner_b = create_account(&ctx, AccountRole::Partner).await?;
        let user = create_account(&ctx, AccountRole::User).await?;
        let food = create_food(&ctx, partner_a, Some(Decimal::TEN)).await?;

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_retrieve_intent()
            .once()
            .return_once(|id| Ok(intent(id, PaymentIntentStatus::Succeeded)));

        let orders = ctx.orders_with_gateway(gateway);

        ctx.carts.add_item(user, food.uuid, 1).await?;
        let order = orders.confirm_order(user, "pi_status".to_string(), None).await?;

        let forbidden = orders
            .update_order_status(partner_b, order.uuid, OrderStatus::Ready)
            .await;

        assert!(
            matches!(forbidden, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {forbidden:?}"
        );

        let updated = orders
            .update_order_status(partner_a, order.uuid, OrderStatus::Preparing)
            .await?;
        assert_eq!(updated.status, OrderStatus::Preparing);

        let seen_by_user = orders.get_order(user, order.uuid).await?;
        assert_eq!(seen_by_user.status, OrderStatus::Preparing);

        let hidden = orders.get_order(partner_b, order.uuid).await;
        assert!(
            matches!(hidden, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {hidden:?}"
        );

        Ok(())
    }
}
