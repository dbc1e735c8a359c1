//! Transaction history.

pub mod models;
pub mod service;

pub use models::{Transaction, TransactionId, TransactionItem};
pub use service::{
    HostedTransactionsService, MockTransactionsService, TransactionsService,
    TransactionsServiceError,
};
