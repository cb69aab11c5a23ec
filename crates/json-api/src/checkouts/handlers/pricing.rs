//! Cart Pricing Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rebate_app::domain::carts::records::OwnerUuid;

use crate::{
    checkouts::{errors::into_status_error, models::CartPricingResponse},
    extensions::*,
};

/// Cart Pricing Handler
///
/// Prices the owner's active cart against the active promotions without checking it out.
#[endpoint(
    tags("checkouts"),
    summary = "Preview Cart Pricing",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid owner"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartPricingResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let pricing = app
        .checkouts
        .price_cart(OwnerUuid::from_uuid(owner.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(pricing.into()))
}
