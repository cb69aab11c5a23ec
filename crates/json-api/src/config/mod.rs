//! Server configuration module

use std::time::Duration;

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, pricing::PricingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod pricing;
pub(crate) mod server;

/// Rebate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "rebate-json", about = "Rebate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Cart pricing settings.
    #[command(flatten)]
    pub pricing: PricingConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Per-transaction statement timeout, unset when configured as zero.
    #[must_use]
    pub fn statement_timeout(&self) -> Option<Duration> {
        self.database.statement_timeout()
    }
}
