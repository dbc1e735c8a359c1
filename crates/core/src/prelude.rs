//! Tillpoint prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    ids::TypedUuid,
    ledger::{CartLedger, LedgerError},
    lines::CartLine,
    pricing::{PricingError, Totals},
    products::{Product, ProductError, ProductFields, ProductId},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
