//! App Router

use salvo::Router;

use crate::{auth, carts, foods, orders, payment};

/// Every `/api` route sits behind the session hoop. Fixed segments are
/// pushed before the `{id}` style segments next to them.
pub fn app_router() -> Router {
    Router::with_path("api")
        .hoop(auth::middleware::handler)
        .push(cart_router())
        .push(orders_router())
        .push(
            Router::with_path("payment/create-payment-intent")
                .post(payment::create_intent::handler),
        )
        .push(food_router())
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .get(carts::get::handler)
        .push(Router::with_path("add").post(carts::add::handler))
        .push(Router::with_path("update/{food_id}").put(carts::update::handler))
        .push(Router::with_path("remove/{food_id}").delete(carts::remove::handler))
        .push(Router::with_path("clear").delete(carts::clear::handler))
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .push(
            Router::with_path("create-payment-intent")
                .post(orders::create_payment_intent::handler),
        )
        .push(Router::with_path("confirm").post(orders::confirm::handler))
        .push(Router::with_path("user").get(orders::user::handler))
        .push(Router::with_path("partner").get(orders::partner::handler))
        .push(
            Router::with_path("{order_id}")
                .get(orders::get::handler)
                .push(Router::with_path("status").put(orders::status::handler)),
        )
}

fn food_router() -> Router {
    Router::with_path("food")
        .get(foods::index::handler)
        .post(foods::create::handler)
        .push(Router::with_path("partner").get(foods::partner::handler))
        .push(Router::with_path("like").post(foods::like::handler))
        .push(
            Router::with_path("save")
                .post(foods::save::handler)
                .get(foods::saved::handler),
        )
        .push(
            Router::with_path("{id}")
                .patch(foods::update::handler)
                .delete(foods::delete::handler),
        )
}
