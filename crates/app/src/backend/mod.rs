//! Hosted backend contract.
//!
//! Every data operation in the system is a call against this trait. The
//! production implementation is [`RestBackend`]; tests substitute a mock or
//! the in-memory fake. Each method is one network round-trip with no
//! client-side coordination beyond program order.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tillpoint::products::ProductId;

use crate::{
    backend::records::{
        NewProductRecord, NewTransactionItemRecord, NewTransactionRecord, ProductPatch,
        ProductRecord, TransactionRecord, UserRecord,
    },
    domain::transactions::models::TransactionId,
};

pub mod errors;
pub mod records;
pub mod rest;

pub use errors::BackendError;
pub use rest::{RestBackend, RestBackendConfig};

/// A half-open creation-time window for transaction history queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest creation time to include.
    pub from: Option<Timestamp>,

    /// Latest creation time to include.
    pub to: Option<Timestamp>,
}

#[automock]
#[async_trait]
pub trait Backend: Send + Sync {
    /// List all products, sorted by name.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, BackendError>;

    /// Create a product row; the backend assigns id and timestamps.
    async fn create_product(
        &self,
        product: NewProductRecord,
    ) -> Result<ProductRecord, BackendError>;

    /// Apply a partial update to a product row.
    async fn update_product(
        &self,
        product: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductRecord, BackendError>;

    /// Delete a product row.
    async fn delete_product(&self, product: ProductId) -> Result<(), BackendError>;

    /// Overwrite a product's recorded stock quantity.
    async fn update_product_stock(
        &self,
        product: ProductId,
        stock_quantity: u32,
    ) -> Result<(), BackendError>;

    /// Create a transaction row; the backend assigns id and timestamp.
    async fn create_transaction(
        &self,
        transaction: NewTransactionRecord,
    ) -> Result<TransactionRecord, BackendError>;

    /// Insert all items of a transaction in one batched write.
    async fn create_transaction_items(
        &self,
        items: Vec<NewTransactionItemRecord>,
    ) -> Result<(), BackendError>;

    /// Delete a transaction row. Used only as the compensating action for
    /// [`Backend::create_transaction`] during checkout rollback.
    async fn delete_transaction(&self, transaction: TransactionId) -> Result<(), BackendError>;

    /// List transactions with nested items and product snapshots, newest
    /// first, optionally bounded by a creation-time window.
    async fn list_transactions(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<TransactionRecord>, BackendError>;

    /// The signed-in operator for the current session.
    async fn current_user(&self) -> Result<UserRecord, BackendError>;

    /// End the current auth session.
    async fn sign_out(&self) -> Result<(), BackendError>;
}
