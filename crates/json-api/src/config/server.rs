//! Listener Config

use clap::Args;

/// Address the Rebate API listens on.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8720")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port` string for the listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
