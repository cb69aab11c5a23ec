//! Get Checkout Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rebate_app::domain::checkouts::records::CheckoutUuid;

use crate::{
    checkouts::{errors::into_status_error, models::CheckoutResponse},
    extensions::*,
};

/// Get Checkout Handler
///
/// Returns a checkout with its lines and applied promotions.
#[endpoint(tags("checkouts"), summary = "Get Checkout")]
pub(crate) async fn handler(
    checkout: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let checkout = app
        .checkouts
        .get_checkout(CheckoutUuid::from_uuid(checkout.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(checkout.into()))
}
