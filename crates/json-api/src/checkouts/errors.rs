//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use rebate_app::domain::checkouts::CheckoutsServiceError;

pub(crate) fn into_status_error(error: CheckoutsServiceError) -> StatusError {
    match error {
        CheckoutsServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Cart is empty")
        }
        CheckoutsServiceError::InsufficientStock { sku } => {
            StatusError::unprocessable_entity().brief(format!("Insufficient stock for {sku}"))
        }
        CheckoutsServiceError::AlreadyCheckedOut => {
            StatusError::conflict().brief("Cart has already been checked out")
        }
        CheckoutsServiceError::InvalidOwnerReference => {
            StatusError::bad_request().brief("Invalid owner reference")
        }
        CheckoutsServiceError::InvalidReference
        | CheckoutsServiceError::MissingRequiredData
        | CheckoutsServiceError::InvalidData => StatusError::bad_request(),
        CheckoutsServiceError::NotFound => StatusError::not_found(),
        CheckoutsServiceError::Pricing(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
        CheckoutsServiceError::InvalidAmount(source) => {
            error!("amount out of range: {source}");

            StatusError::internal_server_error()
        }
        CheckoutsServiceError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn precondition_errors_are_client_errors() {
        let cases = [
            (CheckoutsServiceError::EmptyCart, StatusCode::UNPROCESSABLE_ENTITY),
            (
                CheckoutsServiceError::InsufficientStock {
                    sku: "A".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (CheckoutsServiceError::AlreadyCheckedOut, StatusCode::CONFLICT),
            (CheckoutsServiceError::InvalidOwnerReference, StatusCode::BAD_REQUEST),
            (CheckoutsServiceError::NotFound, StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }

    #[test]
    fn internal_failures_are_server_errors() -> TestResult {
        let Err(source) = u8::try_from(300_u16) else {
            return Err("300 should not fit in a u8".into());
        };

        let status = into_status_error(CheckoutsServiceError::InvalidAmount(source));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}
