//! Checkouts service errors.

use std::num::TryFromIntError;

use rebate::pricing::PricingError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutsServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("cart has already been checked out")]
    AlreadyCheckedOut,

    #[error("owner reference is invalid")]
    InvalidOwnerReference,

    #[error("insufficient stock for sku \"{sku}\"")]
    InsufficientStock { sku: String },

    #[error("checkout not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("failed to price cart")]
    Pricing(#[from] PricingError),

    #[error("amount out of range")]
    InvalidAmount(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // The only unique key a checkout write can hit is its source cart.
            Some(ErrorKind::UniqueViolation) => Self::AlreadyCheckedOut,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
