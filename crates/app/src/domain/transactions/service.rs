//! Transactions service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    backend::{Backend, BackendError, DateRange, records::RecordError},
    domain::transactions::models::Transaction,
};

/// Errors raised by the transactions service.
#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    /// The backend returned a record that failed validation.
    #[error("invalid transaction record from backend")]
    InvalidRecord(#[from] RecordError),

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Transactions service backed by the hosted backend.
#[derive(Clone)]
pub struct HostedTransactionsService {
    backend: Arc<dyn Backend>,
    currency: &'static Currency,
}

impl HostedTransactionsService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, currency: &'static Currency) -> Self {
        Self { backend, currency }
    }
}

#[async_trait]
impl TransactionsService for HostedTransactionsService {
    async fn list_transactions(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, TransactionsServiceError> {
        let records = self.backend.list_transactions(range).await?;
        let mut transactions = Vec::with_capacity(records.len());

        for record in records {
            transactions.push(record.try_into_transaction(self.currency)?);
        }

        Ok(transactions)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Retrieve transactions with nested items, newest first, optionally
    /// bounded by a creation-time window.
    async fn list_transactions(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<Transaction>, TransactionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{backend::MockBackend, test::helpers::transaction_record};

    use super::*;

    #[tokio::test]
    async fn list_transactions_decodes_records() -> TestResult {
        let mut backend = MockBackend::new();

        backend
            .expect_list_transactions()
            .once()
            .withf(|range| range.is_none())
            .return_once(|_| Ok(vec![transaction_record(1, 30_00, 2_40, 32_40)]));

        let service = HostedTransactionsService::new(Arc::new(backend), iso::USD);

        let transactions = service.list_transactions(None).await?;

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].total.to_minor_units(), 32_40);

        Ok(())
    }

    #[tokio::test]
    async fn date_range_is_passed_through() -> TestResult {
        let mut backend = MockBackend::new();
        let from = Timestamp::UNIX_EPOCH;

        backend
            .expect_list_transactions()
            .once()
            .withf(move |range| {
                matches!(range, Some(range) if range.from == Some(from) && range.to.is_none())
            })
            .return_once(|_| Ok(vec![]));

        let service = HostedTransactionsService::new(Arc::new(backend), iso::USD);

        let transactions = service
            .list_transactions(Some(DateRange {
                from: Some(from),
                to: None,
            }))
            .await?;

        assert!(transactions.is_empty());

        Ok(())
    }
}
