//! App Context

use std::{sync::Arc, time::Duration};

use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        checkouts::{CheckoutsService, PgCheckoutsService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("unknown currency \"{0}\"")]
    UnknownCurrency(String),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub checkouts: Arc<dyn CheckoutsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Carts are priced in the ISO 4217 `currency`, and every transaction is bounded by
    /// `statement_timeout` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error when the currency is unknown or establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        statement_timeout: Option<Duration>,
        currency: &str,
    ) -> Result<Self, AppInitError> {
        let currency = Currency::find(currency)
            .ok_or_else(|| AppInitError::UnknownCurrency(currency.to_string()))?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = match statement_timeout {
            Some(timeout) => Db::new(pool).with_statement_timeout(timeout),
            None => Db::new(pool),
        };

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            checkouts: Arc::new(PgCheckoutsService::new(db, currency)),
        })
    }
}
