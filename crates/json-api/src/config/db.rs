//! Database Config

use std::time::Duration;

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Statement timeout applied to every transaction, in milliseconds (0 disables it)
    #[arg(long, env = "DB_STATEMENT_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub db_statement_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Configured statement timeout, if any.
    #[must_use]
    pub fn statement_timeout(&self) -> Option<Duration> {
        (self.db_statement_timeout_ms > 0)
            .then(|| Duration::from_millis(self.db_statement_timeout_ms))
    }
}
