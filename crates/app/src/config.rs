//! Application configuration.
//!
//! Settings come from CLI flags and environment variables (a `.env` file
//! is honoured when present). The tax rate and currency are deliberately
//! configuration values, never constants in the domain code.

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::backend::RestBackendConfig;

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured currency code is not a known ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Hosted backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct BackendSettings {
    /// Backend base URL
    #[arg(long, env = "TILLPOINT_BACKEND_URL")]
    pub backend_url: String,

    /// Backend service API key
    #[arg(long, env = "TILLPOINT_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl BackendSettings {
    /// Build the REST client configuration.
    #[must_use]
    pub fn rest_config(&self) -> RestBackendConfig {
        RestBackendConfig {
            base_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

/// Point-of-sale settings.
#[derive(Debug, Clone, Args)]
pub struct PosSettings {
    /// Sales tax rate as a decimal fraction, e.g. 0.08 for 8%
    #[arg(long, env = "TILLPOINT_TAX_RATE", default_value = "0.08")]
    pub tax_rate: Decimal,

    /// ISO 4217 currency code for prices and totals
    #[arg(long, env = "TILLPOINT_CURRENCY", default_value = "USD")]
    pub currency: String,
}

impl PosSettings {
    /// Resolve the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not a known
    /// ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency).ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "TILLPOINT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
