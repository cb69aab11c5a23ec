//! Owner Checkout Handler

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use rebate_app::domain::carts::records::OwnerUuid;

use crate::{
    checkouts::{errors::into_status_error, models::CheckoutResponse},
    extensions::*,
};

/// Owner Checkout Handler
///
/// Checks out the owner's active cart and clears it.
#[endpoint(
    tags("checkouts"),
    summary = "Check Out Owner Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Checkout created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid owner"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty cart or insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let checkout = app
        .checkouts
        .process_checkout(OwnerUuid::from_uuid(owner.into_inner()))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/checkouts/{}", checkout.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(checkout.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use rebate_app::domain::checkouts::{CheckoutsServiceError, MockCheckoutsService};

    use crate::test_helpers::{checkouts_service, make_checkout};

    use super::*;

    fn make_service(checkouts: MockCheckoutsService) -> Service {
        checkouts_service(
            checkouts,
            Router::with_path("owners/{owner}/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_returns_201() -> TestResult {
        let owner = OwnerUuid::new();
        let checkout = make_checkout(owner);
        let uuid = checkout.uuid;

        let mut checkouts = MockCheckoutsService::new();

        checkouts
            .expect_process_checkout()
            .once()
            .withf(move |o| *o == owner)
            .return_once(move |_| Ok(checkout));

        let mut res = TestClient::post(format!("http://example.com/owners/{owner}/checkout"))
            .send(&make_service(checkouts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(location, Some(format!("/checkouts/{uuid}")));

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.status, "completed");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_422() {
        let mut checkouts = MockCheckoutsService::new();

        checkouts
            .expect_process_checkout()
            .once()
            .return_once(|_| Err(CheckoutsServiceError::EmptyCart));

        let res = TestClient::post(format!(
            "http://example.com/owners/{}/checkout",
            OwnerUuid::new()
        ))
        .send(&make_service(checkouts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_422() {
        let mut checkouts = MockCheckoutsService::new();

        checkouts.expect_process_checkout().once().return_once(|_| {
            Err(CheckoutsServiceError::InsufficientStock {
                sku: "A".to_string(),
            })
        });

        let res = TestClient::post(format!(
            "http://example.com/owners/{}/checkout",
            OwnerUuid::new()
        ))
        .send(&make_service(checkouts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
