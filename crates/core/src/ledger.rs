//! Cart ledger
//!
//! The working set of product/quantity pairs for the active sale. Every
//! mutation is checked against the stock ceiling recorded in the product
//! snapshot; the check is advisory, since concurrent sales elsewhere can
//! deplete live stock beneath the snapshot.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    lines::CartLine,
    pricing::{self, PricingError, Totals},
    products::{Product, ProductId},
};

/// Errors raised by ledger mutations. A failed mutation leaves the ledger
/// in its prior state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The product's snapshot records no stock at all.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The requested quantity exceeds the stock ceiling.
    #[error("only {available} units of product {product} are available in stock")]
    StockExceeded {
        /// The product whose ceiling was hit.
        product: ProductId,

        /// The ceiling recorded in the snapshot.
        available: u32,
    },

    /// The product is priced in a different currency than the ledger.
    #[error("product {product} is priced in {product_currency}, but the ledger uses {ledger_currency}")]
    CurrencyMismatch {
        /// The product with the foreign price.
        product: ProductId,

        /// ISO code of the product's currency.
        product_currency: &'static str,

        /// ISO code of the ledger's currency.
        ledger_currency: &'static str,
    },
}

/// The in-memory cart for the active sale.
///
/// Lines keep their insertion order for display; the order carries no other
/// meaning. An explicitly owned value: callers pass it to whichever view or
/// sequence needs it.
#[derive(Debug)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    tax_rate: Decimal,
}

impl CartLedger {
    /// Create an empty ledger for the given currency and tax rate.
    #[must_use]
    pub fn new(currency: &'static Currency, tax_rate: Decimal) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            tax_rate,
        }
    }

    /// Add `quantity` units of `product`, aggregating with any existing line.
    ///
    /// The stock ceiling is checked against the `product` argument; the
    /// snapshot stored on first add is kept for the line itself.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CurrencyMismatch`] if the product is priced in a
    ///   different currency than the ledger.
    /// - [`LedgerError::OutOfStock`] if the snapshot records zero stock.
    /// - [`LedgerError::StockExceeded`] if the aggregated quantity would
    ///   exceed the snapshot's stock; the existing line is left unchanged.
    pub fn add(&mut self, product: &Product, quantity: NonZeroU32) -> Result<(), LedgerError> {
        let product_currency = product.price().currency();

        if product_currency != self.currency {
            return Err(LedgerError::CurrencyMismatch {
                product: product.id(),
                product_currency: product_currency.iso_alpha_code,
                ledger_currency: self.currency.iso_alpha_code,
            });
        }

        if product.stock_quantity() == 0 {
            return Err(LedgerError::OutOfStock(product.id()));
        }

        if let Some(line) = self.find_mut(product.id()) {
            let requested = line
                .quantity()
                .checked_add(quantity.get())
                .ok_or(LedgerError::StockExceeded {
                    product: product.id(),
                    available: product.stock_quantity(),
                })?;

            if requested > product.stock_quantity() {
                return Err(LedgerError::StockExceeded {
                    product: product.id(),
                    available: product.stock_quantity(),
                });
            }

            match NonZeroU32::new(requested) {
                Some(new_quantity) => line.set_quantity(new_quantity),
                None => unreachable!("sum of non-zero quantities is non-zero"),
            }

            return Ok(());
        }

        if quantity.get() > product.stock_quantity() {
            return Err(LedgerError::StockExceeded {
                product: product.id(),
                available: product.stock_quantity(),
            });
        }

        self.lines.push(CartLine::new(product.clone(), quantity));

        Ok(())
    }

    /// Replace the quantity on the line for `product` with an absolute value.
    ///
    /// A quantity below one removes the line. An unknown product is a no-op,
    /// not an error. The ceiling is checked against the snapshot stored on
    /// the line.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StockExceeded`] if `quantity` exceeds the
    /// snapshot's stock; the line is left unchanged.
    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> Result<(), LedgerError> {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            self.remove(product);
            return Ok(());
        };

        let Some(line) = self.find_mut(product) else {
            return Ok(());
        };

        let available = line.product().stock_quantity();

        if quantity.get() > available {
            return Err(LedgerError::StockExceeded { product, available });
        }

        line.set_quantity(quantity);

        Ok(())
    }

    /// Delete the line for `product` if present. Never fails.
    pub fn remove(&mut self, product: ProductId) {
        self.lines.retain(|line| line.product().id() != product);
    }

    /// Empty the ledger unconditionally. Never fails; idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The line for `product`, if one exists.
    #[must_use]
    pub fn find(&self, product: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product().id() == product)
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (distinct products, not unit count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the ledger holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The ledger currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The configured tax rate.
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Derive subtotal, tax and total. Recomputed on every call, never
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on minor-unit overflow or money
    /// arithmetic failure.
    pub fn totals(&self) -> Result<Totals, PricingError> {
        pricing::totals(&self.lines, self.currency, self.tax_rate)
    }

    /// The subtotal alone. See [`CartLedger::totals`].
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on minor-unit overflow or money
    /// arithmetic failure.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        Ok(self.totals()?.subtotal)
    }

    fn find_mut(&mut self, product: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product().id() == product)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::fixtures;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("test quantities are non-zero")
    }

    fn ledger() -> CartLedger {
        CartLedger::new(iso::USD, Decimal::new(8, 2))
    }

    #[test]
    fn add_appends_a_snapshot_line() -> TestResult {
        let mut ledger = ledger();
        let espresso = fixtures::espresso();

        ledger.add(&espresso, qty(2))?;

        assert_eq!(ledger.len(), 1);

        let line = ledger.find(espresso.id()).expect("line should exist");
        assert_eq!(line.quantity(), 2);

        Ok(())
    }

    #[test]
    fn add_aggregates_quantities_for_the_same_product() -> TestResult {
        let mut ledger = ledger();
        let espresso = fixtures::espresso();

        ledger.add(&espresso, qty(2))?;
        ledger.add(&espresso, qty(3))?;

        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.find(espresso.id()).map(CartLine::quantity),
            Some(5)
        );

        Ok(())
    }

    #[test]
    fn add_rejects_out_of_stock_product() {
        let mut ledger = ledger();
        let gift_card = fixtures::out_of_stock();

        let result = ledger.add(&gift_card, qty(1));

        assert_eq!(result, Err(LedgerError::OutOfStock(gift_card.id())));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_beyond_stock_reports_the_ceiling_and_keeps_no_line() {
        let mut ledger = ledger();
        let croissant = fixtures::croissant();
        let stock = croissant.stock_quantity();

        let result = ledger.add(&croissant, qty(stock + 1));

        assert_eq!(
            result,
            Err(LedgerError::StockExceeded {
                product: croissant.id(),
                available: stock,
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_up_to_stock_succeeds() -> TestResult {
        let mut ledger = ledger();
        let croissant = fixtures::croissant();

        ledger.add(&croissant, qty(croissant.stock_quantity()))?;

        assert_eq!(ledger.len(), 1);

        Ok(())
    }

    #[test]
    fn aggregate_beyond_stock_leaves_existing_line_unchanged() -> TestResult {
        let mut ledger = ledger();
        let mug = fixtures::mug();

        ledger.add(&mug, qty(2))?;

        let result = ledger.add(&mug, qty(1));

        assert_eq!(
            result,
            Err(LedgerError::StockExceeded {
                product: mug.id(),
                available: 2,
            })
        );
        assert_eq!(ledger.find(mug.id()).map(CartLine::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn add_rejects_currency_mismatch() {
        let mut ledger = CartLedger::new(iso::GBP, Decimal::new(8, 2));
        let espresso = fixtures::espresso();

        let result = ledger.add(&espresso, qty(1));

        assert_eq!(
            result,
            Err(LedgerError::CurrencyMismatch {
                product: espresso.id(),
                product_currency: iso::USD.iso_alpha_code,
                ledger_currency: iso::GBP.iso_alpha_code,
            })
        );
    }

    #[test]
    fn set_quantity_replaces_absolutely() -> TestResult {
        let mut ledger = ledger();
        let espresso = fixtures::espresso();

        ledger.add(&espresso, qty(2))?;
        ledger.set_quantity(espresso.id(), 7)?;

        assert_eq!(
            ledger.find(espresso.id()).map(CartLine::quantity),
            Some(7)
        );

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes_the_line() -> TestResult {
        let mut ledger = ledger();
        let espresso = fixtures::espresso();

        ledger.add(&espresso, qty(2))?;
        ledger.set_quantity(espresso.id(), 0)?;

        assert!(ledger.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_on_unknown_product_is_a_no_op() -> TestResult {
        let mut ledger = ledger();

        ledger.set_quantity(fixtures::espresso().id(), 3)?;

        assert!(ledger.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_beyond_stock_leaves_line_unchanged() -> TestResult {
        let mut ledger = ledger();
        let mug = fixtures::mug();

        ledger.add(&mug, qty(1))?;

        let result = ledger.set_quantity(mug.id(), 3);

        assert_eq!(
            result,
            Err(LedgerError::StockExceeded {
                product: mug.id(),
                available: 2,
            })
        );
        assert_eq!(ledger.find(mug.id()).map(CartLine::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn remove_is_infallible_and_tolerates_unknown_products() -> TestResult {
        let mut ledger = ledger();
        let espresso = fixtures::espresso();

        ledger.add(&espresso, qty(1))?;
        ledger.remove(espresso.id());
        ledger.remove(espresso.id());

        assert!(ledger.is_empty());

        Ok(())
    }

    #[test]
    fn clear_is_idempotent() -> TestResult {
        let mut ledger = ledger();

        ledger.add(&fixtures::espresso(), qty(1))?;
        ledger.clear();
        ledger.clear();

        assert!(ledger.is_empty());

        Ok(())
    }

    #[test]
    fn totals_follow_the_tax_invariant() -> TestResult {
        let mut ledger = ledger();

        ledger.add(&fixtures::espresso(), qty(3))?;
        ledger.add(&fixtures::croissant(), qty(2))?;

        let totals = ledger.totals()?;
        let expected_total = totals.subtotal.add(totals.tax)?;

        assert_eq!(totals.total, expected_total);

        Ok(())
    }

    #[test]
    fn totals_of_cleared_ledger_are_zero() -> TestResult {
        let mut ledger = ledger();

        ledger.add(&fixtures::espresso(), qty(3))?;
        ledger.clear();

        assert_eq!(ledger.subtotal()?, Money::from_minor(0, iso::USD));

        Ok(())
    }
}
