//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, query};

/// SQL used to bound how long any statement inside a transaction may run.
pub const SET_STATEMENT_TIMEOUT_SQL: &str = "SELECT set_config('statement_timeout', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    statement_timeout: Option<Duration>,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statement_timeout: None,
        }
    }

    /// Apply `timeout` as a transaction-local `statement_timeout` to every transaction.
    #[must_use]
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    /// Begin a transaction, applying the configured statement timeout.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the timeout fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if let Some(timeout) = self.statement_timeout {
            query(SET_STATEMENT_TIMEOUT_SQL)
                .bind(format!("{}ms", timeout.as_millis()))
                .execute(&mut *tx)
                .await?;
        }

        Ok(tx)
    }

    /// Underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
