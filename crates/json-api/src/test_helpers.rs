//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use reelbite_app::{
    auth::{Actor, MockAuthService},
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRole, AccountUuid},
        },
        carts::MockCartsService,
        foods::{
            MockFoodsService,
            records::{FoodRecord, FoodSummary, FoodUuid},
        },
        orders::MockOrdersService,
    },
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: Actor = Actor {
    uuid: AccountUuid::from_uuid(Uuid::nil()),
    role: AccountRole::User,
};

pub(crate) const TEST_PARTNER: Actor = Actor {
    uuid: AccountUuid::from_uuid(Uuid::from_u128(0x01)),
    role: AccountRole::Partner,
};

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_partner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(TEST_PARTNER);
    ctrl.call_next(req, depot, res).await;
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_create_account().never();
    accounts.expect_get_account().never();

    accounts
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_session().never();

    auth
}

fn strict_foods_mock() -> MockFoodsService {
    let mut foods = MockFoodsService::new();

    foods.expect_create_food().never();
    foods.expect_list_foods().never();
    foods.expect_list_partner_foods().never();
    foods.expect_update_food().never();
    foods.expect_delete_food().never();
    foods.expect_toggle_like().never();
    foods.expect_toggle_save().never();
    foods.expect_list_saved_foods().never();

    foods
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_get_cart().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_create_payment_intent().never();
    orders.expect_create_amount_payment_intent().never();
    orders.expect_confirm_order().never();
    orders.expect_get_order().never();
    orders.expect_update_order_status().never();
    orders.expect_list_user_orders().never();
    orders.expect_list_partner_orders().never();

    orders
}

/// Service mocks backing a test [`State`]. Every method not set up by the
/// test is expected never to be called.
pub(crate) struct TestServices {
    pub(crate) foods: MockFoodsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            foods: strict_foods_mock(),
            carts: strict_carts_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            accounts: Arc::new(strict_accounts_mock()),
            foods: Arc::new(self.foods),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    TestServices {
        auth,
        ..TestServices::default()
    }
    .into_state()
}

/// A service that runs `route` as the regular test user.
pub(crate) fn user_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service that runs `route` as the test food partner.
pub(crate) fn partner_service(services: TestServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_partner)
            .push(route),
    )
}

pub(crate) fn carts_services(carts: MockCartsService) -> TestServices {
    TestServices {
        carts,
        ..TestServices::default()
    }
}

pub(crate) fn orders_services(orders: MockOrdersService) -> TestServices {
    TestServices {
        orders,
        ..TestServices::default()
    }
}

pub(crate) fn foods_services(foods: MockFoodsService) -> TestServices {
    TestServices {
        foods,
        ..TestServices::default()
    }
}

pub(crate) fn make_food(uuid: FoodUuid, partner: AccountUuid) -> FoodRecord {
    FoodRecord {
        uuid,
        partner_uuid: partner,
        name: "Paneer Tikka".to_string(),
        description: "Char-grilled cottage cheese".to_string(),
        price: Some(Decimal::new(24_950, 2)),
        video_url: "https://media.test/paneer.mp4".to_string(),
        video_file_id: Some("file_paneer".to_string()),
        like_count: 0,
        saves_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line_food(uuid: FoodUuid) -> FoodSummary {
    FoodSummary::from(&make_food(uuid, TEST_PARTNER.uuid))
}
