//! Checkout sequencing.
//!
//! Converts the cart ledger into a persisted transaction via a fixed,
//! ordered sequence of backend writes, tracked as an explicit state
//! machine with a compensating-action log for partial failures.

pub mod errors;
pub mod models;
pub mod sequencer;

pub use errors::{CheckoutError, CheckoutStep, RollbackOutcome};
pub use models::{CheckoutRequest, CompletedSale, SaleState};
pub use sequencer::CheckoutSequencer;
