//! Checkout sequencer.
//!
//! Steps run in strict program order; each write is issued only after the
//! previous one is acknowledged. There is no cross-session isolation: the
//! stock decrements are last-write-wins against the snapshots held in the
//! cart, so concurrent sales can still race on the backend's stock column.

use std::sync::Arc;

use rusty_money::{Money, iso::Currency};
use tillpoint::{
    ledger::CartLedger, pricing::PricingError, products::ProductId, receipt::Receipt,
};

use crate::{
    auth::models::UserId,
    backend::{
        Backend,
        records::{NewTransactionItemRecord, NewTransactionRecord},
    },
    domain::{
        checkout::{
            errors::{CheckoutError, CheckoutStep, RollbackOutcome},
            models::{CheckoutRequest, CompletedSale, SaleState},
        },
        transactions::models::{Transaction, TransactionId, TransactionItem},
    },
};

/// A recorded inverse for one committed write, replayed in reverse order
/// when a later step fails.
#[derive(Debug)]
enum Compensation {
    DeleteTransaction(TransactionId),
    RestoreStock { product: ProductId, quantity: u32 },
}

/// Drives the cart through the fixed checkout write sequence.
#[derive(Clone)]
pub struct CheckoutSequencer {
    backend: Arc<dyn Backend>,
}

impl CheckoutSequencer {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Run the checkout sequence for the given ledger.
    ///
    /// On success the ledger is cleared and the completed sale is returned
    /// with a receipt captured beforehand. On failure the ledger is left
    /// untouched and any committed writes are compensated in reverse order;
    /// compensation failures are logged and reported in the error, never
    /// silently dropped.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] if the ledger holds no lines.
    /// - [`CheckoutError::InsufficientPayment`] if tendered cash does not
    ///   cover the total. Neither precondition issues any backend write.
    /// - [`CheckoutError::Failed`] if a backend write fails mid-sequence.
    pub async fn checkout(
        &self,
        ledger: &mut CartLedger,
        request: CheckoutRequest,
        cashier: UserId,
    ) -> Result<CompletedSale, CheckoutError> {
        if ledger.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = ledger.totals()?;

        let change = match request.cash_tendered {
            Some(tendered) => Some(validate_cash(tendered, totals.total)?),
            None => None,
        };

        let mut receipt = Receipt::from_ledger(ledger)?;

        if let Some(tendered) = request.cash_tendered {
            receipt = receipt.with_cash(tendered)?;
        }

        tracing::debug!(state = %SaleState::Pending, lines = ledger.len(), "starting checkout");

        let mut compensations: Vec<Compensation> = Vec::new();

        let record = match self
            .backend
            .create_transaction(NewTransactionRecord {
                subtotal: totals.subtotal.to_minor_units(),
                tax: totals.tax.to_minor_units(),
                total: totals.total.to_minor_units(),
                customer_email: request.customer_email.clone(),
                created_by: cashier,
            })
            .await
        {
            Ok(record) => record,
            Err(source) => {
                return Err(CheckoutError::Failed {
                    step: CheckoutStep::CreateTransaction,
                    source,
                    rollback: RollbackOutcome::NotRequired,
                });
            }
        };

        compensations.push(Compensation::DeleteTransaction(record.id));

        tracing::debug!(
            state = %SaleState::TransactionCreated,
            transaction = %record.id,
            "transaction row created"
        );

        let item_records: Vec<NewTransactionItemRecord> = ledger
            .lines()
            .iter()
            .map(|line| NewTransactionItemRecord {
                transaction_id: record.id,
                product_id: line.product().id(),
                quantity: i64::from(line.quantity()),
                price_at_time: line.product().price().to_minor_units(),
            })
            .collect();

        if let Err(source) = self
            .backend
            .create_transaction_items(item_records.clone())
            .await
        {
            let rollback = self.roll_back(compensations).await;

            return Err(CheckoutError::Failed {
                step: CheckoutStep::WriteItems,
                source,
                rollback,
            });
        }

        tracing::debug!(
            state = %SaleState::ItemsWritten,
            items = item_records.len(),
            "item rows written"
        );

        for line in ledger.lines() {
            let product = line.product();
            let remaining = product.stock_quantity().saturating_sub(line.quantity());

            if let Err(source) = self
                .backend
                .update_product_stock(product.id(), remaining)
                .await
            {
                let rollback = self.roll_back(compensations).await;

                return Err(CheckoutError::Failed {
                    step: CheckoutStep::AdjustStock,
                    source,
                    rollback,
                });
            }

            compensations.push(Compensation::RestoreStock {
                product: product.id(),
                quantity: product.stock_quantity(),
            });
        }

        tracing::debug!(state = %SaleState::StockAdjusted, "stock decrements applied");

        let items = ledger
            .lines()
            .iter()
            .map(|line| TransactionItem {
                product_id: line.product().id(),
                quantity: line.quantity(),
                price_at_time: *line.product().price(),
                product: Some(line.product().clone()),
            })
            .collect();

        let transaction = Transaction {
            id: record.id,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            customer_email: request.customer_email,
            created_by: cashier,
            created_at: record.created_at,
            items,
        };

        ledger.clear();

        tracing::info!(
            state = %SaleState::Committed,
            transaction = %transaction.id,
            total = %transaction.total,
            "checkout committed"
        );

        Ok(CompletedSale {
            transaction,
            receipt,
            change,
        })
    }

    /// Replay the compensation log in reverse order.
    async fn roll_back(&self, mut compensations: Vec<Compensation>) -> RollbackOutcome {
        let mut failed = 0;

        while let Some(compensation) = compensations.pop() {
            let result = match compensation {
                Compensation::RestoreStock { product, quantity } => {
                    self.backend.update_product_stock(product, quantity).await
                }
                Compensation::DeleteTransaction(transaction) => {
                    self.backend.delete_transaction(transaction).await
                }
            };

            if let Err(error) = result {
                failed += 1;
                tracing::warn!(%error, "compensating action failed during checkout rollback");
            }
        }

        if failed == 0 {
            RollbackOutcome::Complete
        } else {
            RollbackOutcome::Incomplete { failed }
        }
    }
}

fn validate_cash(
    tendered: Money<'static, Currency>,
    total: Money<'static, Currency>,
) -> Result<Money<'static, Currency>, CheckoutError> {
    if tendered.to_minor_units() < total.to_minor_units() {
        let shortfall = total.sub(tendered).map_err(PricingError::from)?;

        return Err(CheckoutError::InsufficientPayment { shortfall });
    }

    Ok(tendered.sub(total).map_err(PricingError::from)?)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;
    use tillpoint::fixtures;

    use crate::{
        backend::{BackendError, MockBackend},
        test::{
            backend::InMemoryBackend,
            helpers::{cashier, qty, transaction_response},
        },
    };

    use super::*;

    fn usd_ledger() -> CartLedger {
        CartLedger::new(iso::USD, Decimal::new(8, 2))
    }

    fn write_failure() -> BackendError {
        BackendError::UnexpectedResponse {
            status: 500,
            body: "backend write rejected".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_cart_issues_no_writes() {
        let backend = MockBackend::new();
        let sequencer = CheckoutSequencer::new(Arc::new(backend));
        let mut ledger = usd_ledger();

        let result = sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn short_cash_reports_the_shortfall_and_issues_no_writes() -> TestResult {
        let backend = MockBackend::new();
        let sequencer = CheckoutSequencer::new(Arc::new(backend));

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(3))?;

        // Total is 32.40; 30.00 leaves a 2.40 shortfall.
        let result = sequencer
            .checkout(
                &mut ledger,
                CheckoutRequest {
                    customer_email: None,
                    cash_tendered: Some(Money::from_minor(30_00, iso::USD)),
                },
                cashier(),
            )
            .await;

        match result {
            Err(CheckoutError::InsufficientPayment { shortfall }) => {
                assert_eq!(shortfall, Money::from_minor(2_40, iso::USD));
            }
            other => panic!("expected InsufficientPayment, got {other:?}"),
        }

        assert_eq!(ledger.len(), 1, "ledger should stay populated");

        Ok(())
    }

    #[tokio::test]
    async fn two_line_checkout_issues_exactly_the_expected_writes() -> TestResult {
        let mut backend = MockBackend::new();

        backend
            .expect_create_transaction()
            .once()
            .withf(|record| record.subtotal == 11_25 && record.total == 12_15)
            .return_once(|record| Ok(transaction_response(7, record)));

        backend
            .expect_create_transaction_items()
            .once()
            .withf(|items| items.len() == 2)
            .return_once(|_| Ok(()));

        backend
            .expect_update_product_stock()
            .times(2)
            .returning(|_, _| Ok(()));

        backend.expect_delete_transaction().never();

        let sequencer = CheckoutSequencer::new(Arc::new(backend));

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::espresso(), qty(3))?;
        ledger.add(&fixtures::croissant(), qty(1))?;

        let sale = sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await?;

        assert!(ledger.is_empty(), "ledger should clear on success");
        assert_eq!(sale.transaction.items.len(), 2);
        assert_eq!(sale.transaction.total, Money::from_minor(12_15, iso::USD));
        assert!(sale.change.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn stock_decrement_targets_snapshot_minus_quantity() -> TestResult {
        let backend = InMemoryBackend::with_products(vec![fixtures::beans()]);
        let backend = Arc::new(backend);
        let sequencer = CheckoutSequencer::new(backend.clone());

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(3))?;

        sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await?;

        assert_eq!(backend.stock_of(fixtures::beans().id()), Some(2));
        assert_eq!(backend.transaction_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn items_write_failure_deletes_the_orphan_transaction() -> TestResult {
        let backend = Arc::new(
            InMemoryBackend::with_products(vec![fixtures::beans()]).failing_items_write(),
        );
        let sequencer = CheckoutSequencer::new(backend.clone());

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(2))?;

        let result = sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await;

        match result {
            Err(CheckoutError::Failed {
                step: CheckoutStep::WriteItems,
                rollback: RollbackOutcome::Complete,
                ..
            }) => {}
            other => panic!("expected Failed at WriteItems with rollback, got {other:?}"),
        }

        assert_eq!(
            backend.transaction_count(),
            0,
            "orphan transaction should be deleted"
        );
        assert_eq!(ledger.len(), 1, "ledger should stay populated");

        Ok(())
    }

    #[tokio::test]
    async fn partial_stock_failure_restores_adjusted_stocks() -> TestResult {
        let backend = Arc::new(
            InMemoryBackend::with_products(vec![fixtures::espresso(), fixtures::croissant()])
                .failing_stock_write_after(1),
        );
        let sequencer = CheckoutSequencer::new(backend.clone());

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::espresso(), qty(3))?;
        ledger.add(&fixtures::croissant(), qty(1))?;

        let result = sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await;

        match result {
            Err(CheckoutError::Failed {
                step: CheckoutStep::AdjustStock,
                rollback: RollbackOutcome::Complete,
                ..
            }) => {}
            other => panic!("expected Failed at AdjustStock with rollback, got {other:?}"),
        }

        assert_eq!(
            backend.stock_of(fixtures::espresso().id()),
            Some(fixtures::espresso().stock_quantity()),
            "first decrement should be compensated"
        );
        assert_eq!(backend.transaction_count(), 0);
        assert_eq!(ledger.len(), 2, "ledger should stay populated");

        Ok(())
    }

    #[tokio::test]
    async fn transaction_create_failure_needs_no_rollback() -> TestResult {
        let mut backend = MockBackend::new();

        backend
            .expect_create_transaction()
            .once()
            .return_once(|_| Err(write_failure()));

        backend.expect_create_transaction_items().never();
        backend.expect_update_product_stock().never();
        backend.expect_delete_transaction().never();

        let sequencer = CheckoutSequencer::new(Arc::new(backend));

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(1))?;

        let result = sequencer
            .checkout(&mut ledger, CheckoutRequest::default(), cashier())
            .await;

        match result {
            Err(CheckoutError::Failed {
                step: CheckoutStep::CreateTransaction,
                rollback: RollbackOutcome::NotRequired,
                ..
            }) => {}
            other => panic!("expected Failed at CreateTransaction, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn cash_sale_returns_change_and_receipt() -> TestResult {
        let backend = InMemoryBackend::with_products(vec![fixtures::beans()]);
        let sequencer = CheckoutSequencer::new(Arc::new(backend));

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(3))?;

        let sale = sequencer
            .checkout(
                &mut ledger,
                CheckoutRequest {
                    customer_email: Some("customer@example.com".to_string()),
                    cash_tendered: Some(Money::from_minor(35_00, iso::USD)),
                },
                cashier(),
            )
            .await?;

        assert_eq!(sale.change, Some(Money::from_minor(2_60, iso::USD)));
        assert_eq!(sale.transaction.customer_email.as_deref(), Some("customer@example.com"));
        assert!(sale.receipt.render().contains("2.60"));

        Ok(())
    }

    #[tokio::test]
    async fn exact_cash_returns_zero_change() -> TestResult {
        let backend = InMemoryBackend::with_products(vec![fixtures::beans()]);
        let sequencer = CheckoutSequencer::new(Arc::new(backend));

        let mut ledger = usd_ledger();
        ledger.add(&fixtures::beans(), qty(3))?;

        let sale = sequencer
            .checkout(
                &mut ledger,
                CheckoutRequest {
                    customer_email: None,
                    cash_tendered: Some(Money::from_minor(32_40, iso::USD)),
                },
                cashier(),
            )
            .await?;

        assert_eq!(sale.change, Some(Money::from_minor(0, iso::USD)));

        Ok(())
    }
}
