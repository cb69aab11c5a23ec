//! Pricing Config

use clap::Args;

/// Pricing settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO 4217 code of the currency product prices are held in
    #[arg(long, env = "CURRENCY", default_value = "GBP")]
    pub currency: String,
}
