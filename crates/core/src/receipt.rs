//! Receipt
//!
//! Plain-text rendering of a sale. A receipt captures the ledger's lines
//! and derived figures at the moment it is built, so it stays printable
//! after the ledger is cleared by a successful checkout.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    ledger::CartLedger,
    pricing::{PricingError, Totals},
};

/// Errors that can occur when building a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error deriving the ledger's monetary figures.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One rendered line: name, quantity, unit price and line total.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    name: String,
    quantity: u32,
    unit_price: Money<'static, Currency>,
    line_total: Money<'static, Currency>,
}

impl ReceiptLine {
    /// The product name as it appeared in the cart.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units sold on this line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at sale time.
    #[must_use]
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'static, Currency> {
        self.line_total
    }
}

/// Cash handed over and the change due back.
#[derive(Debug, Clone, Copy)]
struct CashTender {
    tendered: Money<'static, Currency>,
    change: Money<'static, Currency>,
}

/// A printable snapshot of a sale.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 8]>,
    totals: Totals,
    cash: Option<CashTender>,
}

impl Receipt {
    /// Capture the ledger's current lines and figures.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the ledger's totals cannot be derived.
    pub fn from_ledger(ledger: &CartLedger) -> Result<Self, ReceiptError> {
        let mut lines = SmallVec::new();

        for line in ledger.lines() {
            lines.push(ReceiptLine {
                name: line.product().name().to_string(),
                quantity: line.quantity(),
                unit_price: *line.product().price(),
                line_total: line.line_total()?,
            });
        }

        Ok(Self {
            lines,
            totals: ledger.totals()?,
            cash: None,
        })
    }

    /// Record the cash tendered and compute the change due.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the change cannot be computed.
    pub fn with_cash(mut self, tendered: Money<'static, Currency>) -> Result<Self, ReceiptError> {
        let change = tendered.sub(self.totals.total)?;

        self.cash = Some(CashTender { tendered, change });

        Ok(self)
    }

    /// The captured lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// The captured subtotal/tax/total figures.
    #[must_use]
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Render the receipt as a text table followed by the summary figures.
    #[must_use]
    pub fn render(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.modify(Columns::new(1..), Alignment::right());

        let mut out = table.to_string();

        out.push_str(&format!("\n\nSubtotal  {}", self.totals.subtotal));
        out.push_str(&format!("\nTax       {}", self.totals.tax));
        out.push_str(&format!("\nTotal     {}", self.totals.total));

        if let Some(cash) = self.cash {
            out.push_str(&format!("\nCash      {}", cash.tendered));
            out.push_str(&format!("\nChange    {}", cash.change));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::fixtures;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("test quantities are non-zero")
    }

    fn ledger_with_lines() -> CartLedger {
        let mut ledger = CartLedger::new(iso::USD, Decimal::new(8, 2));

        ledger
            .add(&fixtures::beans(), qty(3))
            .expect("fixture add stays within stock");

        ledger
    }

    #[test]
    fn captures_lines_and_totals() -> TestResult {
        let ledger = ledger_with_lines();
        let receipt = Receipt::from_ledger(&ledger)?;

        assert_eq!(receipt.lines().len(), 1);
        assert_eq!(receipt.lines().first().map(ReceiptLine::quantity), Some(3));
        assert_eq!(
            receipt.totals().subtotal,
            Money::from_minor(30_00, iso::USD)
        );

        Ok(())
    }

    #[test]
    fn receipt_survives_ledger_clear() -> TestResult {
        let mut ledger = ledger_with_lines();
        let receipt = Receipt::from_ledger(&ledger)?;

        ledger.clear();

        assert_eq!(receipt.lines().len(), 1);

        Ok(())
    }

    #[test]
    fn cash_row_carries_change() -> TestResult {
        let ledger = ledger_with_lines();

        // Total is 32.40 at 8% tax; 40.00 cash leaves 7.60 change.
        let receipt =
            Receipt::from_ledger(&ledger)?.with_cash(Money::from_minor(40_00, iso::USD))?;

        let rendered = receipt.render();

        assert!(rendered.contains("Change"), "rendered: {rendered}");
        assert!(rendered.contains("7.60"), "rendered: {rendered}");

        Ok(())
    }

    #[test]
    fn render_lists_each_line() -> TestResult {
        let ledger = ledger_with_lines();
        let rendered = Receipt::from_ledger(&ledger)?.render();

        assert!(
            rendered.contains("House Blend Beans"),
            "rendered: {rendered}"
        );
        assert!(rendered.contains("Subtotal"), "rendered: {rendered}");

        Ok(())
    }
}
