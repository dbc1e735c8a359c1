//! Checkout errors.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tillpoint::{pricing::PricingError, receipt::ReceiptError};

use crate::backend::BackendError;

/// The backend write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Creating the transaction row.
    CreateTransaction,

    /// Batch-inserting the item rows.
    WriteItems,

    /// Decrementing one product's stock.
    AdjustStock,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::CreateTransaction => "create transaction",
            CheckoutStep::WriteItems => "write transaction items",
            CheckoutStep::AdjustStock => "adjust product stock",
        };

        f.write_str(name)
    }
}

/// What happened to the writes already committed when a step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// Nothing had been written yet, so there was nothing to undo.
    NotRequired,

    /// Every compensating action succeeded; the backend is back to its
    /// pre-checkout state.
    Complete,

    /// Some compensating actions failed; the backend is left inconsistent.
    Incomplete {
        /// Number of compensating actions that failed.
        failed: usize,
    },
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackOutcome::NotRequired => f.write_str("no rollback required"),
            RollbackOutcome::Complete => f.write_str("rolled back"),
            RollbackOutcome::Incomplete { failed } => {
                write!(f, "rollback incomplete ({failed} compensating actions failed)")
            }
        }
    }
}

/// Errors raised by the checkout sequencer. Preconditions fail before any
/// backend write; a mid-sequence failure reports the step that failed and
/// the rollback outcome.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The ledger holds no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Tendered cash does not cover the total.
    #[error("insufficient payment: short by {shortfall}")]
    InsufficientPayment {
        /// How much more is needed to cover the total.
        shortfall: Money<'static, Currency>,
    },

    /// The ledger's totals could not be derived.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The receipt could not be captured.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// A backend write failed mid-sequence.
    #[error("checkout failed at step: {step} ({rollback})")]
    Failed {
        /// The step whose write failed.
        step: CheckoutStep,

        /// The underlying backend failure.
        #[source]
        source: BackendError,

        /// What happened to the writes already committed.
        rollback: RollbackOutcome,
    },
}
