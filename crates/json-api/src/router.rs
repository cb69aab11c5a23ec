//! App Router

use salvo::Router;

use crate::{checkouts, healthcheck};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("owners/{owner}")
                .push(Router::with_path("cart/pricing").get(checkouts::pricing::handler))
                .push(Router::with_path("checkout").post(checkouts::owner_checkout::handler)),
        )
        .push(Router::with_path("carts/{cart}/checkout").post(checkouts::cart_checkout::handler))
        .push(Router::with_path("checkouts/{checkout}").get(checkouts::get::handler))
}
