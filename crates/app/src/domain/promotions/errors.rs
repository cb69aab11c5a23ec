//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion uuid is already in use")]
    DuplicateUuid,

    #[error("promotion not found")]
    NotFound,

    /// Empty name or a kind the engine does not know.
    #[error("invalid promotion")]
    InvalidPromotion,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // Promotions are only keyed by uuid.
            Some(ErrorKind::UniqueViolation) => Self::DuplicateUuid,
            Some(ErrorKind::CheckViolation) => Self::InvalidPromotion,
            _ => Self::Sql(error),
        }
    }
}
