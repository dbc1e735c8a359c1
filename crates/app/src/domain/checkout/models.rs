//! Checkout Models

use std::fmt;

use rusty_money::{Money, iso::Currency};
use tillpoint::receipt::Receipt;

use crate::domain::transactions::models::Transaction;

/// Caller-supplied details for one checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    /// Optional customer contact to record on the transaction.
    pub customer_email: Option<String>,

    /// Cash handed over, for the cash-drawer flow. When present it must
    /// cover the total; when absent no payment validation is applied.
    pub cash_tendered: Option<Money<'static, Currency>>,
}

/// The states the checkout sequence moves through, in order. Used for
/// structured logging of the sequence's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleState {
    /// Preconditions passed, no writes issued yet.
    Pending,

    /// The transaction row exists.
    TransactionCreated,

    /// All item rows exist.
    ItemsWritten,

    /// Every product's stock has been decremented.
    StockAdjusted,

    /// The ledger is cleared and the sale is final.
    Committed,
}

impl fmt::Display for SaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SaleState::Pending => "pending",
            SaleState::TransactionCreated => "transaction_created",
            SaleState::ItemsWritten => "items_written",
            SaleState::StockAdjusted => "stock_adjusted",
            SaleState::Committed => "committed",
        };

        f.write_str(name)
    }
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone)]
pub struct CompletedSale {
    /// The persisted transaction, with its frozen item snapshots.
    pub transaction: Transaction,

    /// A printable receipt captured before the ledger was cleared.
    pub receipt: Receipt,

    /// Change due back for cash sales.
    pub change: Option<Money<'static, Currency>>,
}
