//! App Context

use std::sync::Arc;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tillpoint::ledger::CartLedger;

use crate::{
    auth::{AuthService, HostedAuthService},
    backend::{Backend, RestBackend},
    config::{BackendSettings, ConfigError, PosSettings},
    domain::{
        catalog::{CatalogService, HostedCatalogService},
        checkout::CheckoutSequencer,
        transactions::{HostedTransactionsService, TransactionsService},
    },
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// A configuration value failed to resolve.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The application's service graph, built once at startup and passed by
/// reference to whichever command needs it.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub auth: Arc<dyn AuthService>,
    pub checkout: CheckoutSequencer,
    currency: &'static Currency,
    tax_rate: Decimal,
}

impl AppContext {
    /// Build the context from backend and point-of-sale settings.
    ///
    /// # Errors
    ///
    /// Returns an error when a configuration value fails to resolve.
    pub fn from_settings(
        backend: &BackendSettings,
        pos: &PosSettings,
    ) -> Result<Self, AppInitError> {
        let currency = pos.currency()?;
        let backend: Arc<dyn Backend> = Arc::new(RestBackend::new(backend.rest_config()));

        Ok(Self::with_backend(backend, currency, pos.tax_rate))
    }

    /// Build the context over an existing backend handle.
    #[must_use]
    pub fn with_backend(
        backend: Arc<dyn Backend>,
        currency: &'static Currency,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            catalog: Arc::new(HostedCatalogService::new(backend.clone(), currency)),
            transactions: Arc::new(HostedTransactionsService::new(backend.clone(), currency)),
            auth: Arc::new(HostedAuthService::new(backend.clone())),
            checkout: CheckoutSequencer::new(backend),
            currency,
            tax_rate,
        }
    }

    /// The configured currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The configured tax rate.
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// A fresh, empty cart ledger for one sale, owned by the caller.
    #[must_use]
    pub fn new_ledger(&self) -> CartLedger {
        CartLedger::new(self.currency, self.tax_rate)
    }
}
