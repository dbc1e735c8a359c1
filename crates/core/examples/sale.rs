//! Walk-up sale example
//!
//! Builds a small cart from the bundled fixtures, tenders cash, and prints
//! the rendered receipt.

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tillpoint::{fixtures, prelude::*};

#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let mut ledger = CartLedger::new(iso::USD, Decimal::new(8, 2));

    let two = NonZeroU32::new(2).context("quantity must be non-zero")?;
    let one = NonZeroU32::new(1).context("quantity must be non-zero")?;

    ledger.add(&fixtures::espresso(), two)?;
    ledger.add(&fixtures::croissant(), one)?;

    let receipt = Receipt::from_ledger(&ledger)?.with_cash(Money::from_minor(20_00, iso::USD))?;

    println!("{}", receipt.render());

    Ok(())
}
