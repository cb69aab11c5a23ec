//! Handler extension traits.

use std::{fmt::Display, sync::Arc};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use rebate_app::context::AppContext;

use crate::state::State;

/// Access to the injected application state.
pub(crate) trait DepotExt {
    /// Services of the injected [`State`], or a 500 when none was injected.
    fn app_or_500(&self) -> Result<&AppContext, StatusError>;
}

impl DepotExt for Depot {
    fn app_or_500(&self) -> Result<&AppContext, StatusError> {
        self.obtain::<Arc<State>>()
            .map(|state| &state.app)
            .map_err(|_ignored| {
                error!("application state missing from depot");

                StatusError::internal_server_error()
            })
    }
}

/// Map any error to a logged internal server error.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}
