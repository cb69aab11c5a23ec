//! Cart Checkout Handler

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rebate_app::domain::carts::records::CartUuid;

use crate::{
    checkouts::{errors::into_status_error, models::CheckoutResponse},
    extensions::*,
};

/// Cart Checkout Handler
///
/// Checks out a specific cart. Repeating the request for the same cart is rejected.
#[endpoint(
    tags("checkouts"),
    summary = "Check Out Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Checkout created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty cart or insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let checkout = app
        .checkouts
        .process_cart_checkout(CartUuid::from_uuid(cart.into_inner()))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/checkouts/{}", checkout.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(checkout.into()))
}
