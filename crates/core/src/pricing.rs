//! Pricing
//!
//! Monetary arithmetic for cart lines: line totals, and the derived
//! subtotal/tax/total bundle. Tax is computed on minor units in decimal
//! space and rounded half-away-from-zero, so `total = subtotal + tax`
//! holds exactly in minor units.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::lines::CartLine;

/// Errors that can occur while deriving cart totals.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line total overflowed the minor-unit range.
    #[error("line total overflowed minor units")]
    Overflow,

    /// The tax amount could not be represented in minor units.
    #[error("tax amount could not be represented in minor units")]
    TaxConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The derived monetary figures for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money<'static, Currency>,

    /// Tax on the subtotal, rounded to minor units.
    pub tax: Money<'static, Currency>,

    /// Subtotal plus tax.
    pub total: Money<'static, Currency>,
}

/// Calculate the total for one line: unit price times quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product of price and quantity
/// does not fit in minor units.
pub fn line_total(
    price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Calculate the tax due on an amount at the given rate.
///
/// # Errors
///
/// Returns [`PricingError::TaxConversion`] if the product cannot be
/// represented in minor units.
pub fn tax_on(
    amount: &Money<'static, Currency>,
    rate: Decimal,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor = tax_minor(amount.to_minor_units(), rate)?;

    Ok(Money::from_minor(minor, amount.currency()))
}

/// Derive subtotal, tax and total for a set of cart lines.
///
/// An empty set of lines yields zero for all three figures.
///
/// # Errors
///
/// Returns a [`PricingError`] on minor-unit overflow or money arithmetic
/// failure.
pub fn totals(
    lines: &[CartLine],
    currency: &'static Currency,
    tax_rate: Decimal,
) -> Result<Totals, PricingError> {
    let mut subtotal = Money::from_minor(0, currency);

    for line in lines {
        subtotal = subtotal.add(line.line_total()?)?;
    }

    let tax = tax_on(&subtotal, tax_rate)?;
    let total = subtotal.add(tax)?;

    Ok(Totals {
        subtotal,
        tax,
        total,
    })
}

/// Apply a decimal rate to a minor-unit amount, rounding half-away-from-zero.
fn tax_minor(minor: i64, rate: Decimal) -> Result<i64, PricingError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("every i64 is representable as a Decimal")
    };

    let applied = rate.checked_mul(minor).ok_or(PricingError::TaxConversion)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::TaxConversion)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso;
    use testresult::TestResult;

    use crate::fixtures;

    use super::*;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).expect("test quantities are non-zero")
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let price = Money::from_minor(3_50, iso::USD);

        assert_eq!(line_total(&price, 4)?, Money::from_minor(14_00, iso::USD));

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_reported() {
        let price = Money::from_minor(i64::MAX, iso::USD);

        assert!(matches!(
            line_total(&price, 2),
            Err(PricingError::Overflow)
        ));
    }

    #[test]
    fn tax_rounds_midpoint_away_from_zero() -> TestResult {
        // 1.25 at 10% is 0.125, which rounds up to 0.13.
        let amount = Money::from_minor(1_25, iso::USD);

        assert_eq!(
            tax_on(&amount, Decimal::new(10, 2))?,
            Money::from_minor(13, iso::USD)
        );

        Ok(())
    }

    #[test]
    fn totals_of_no_lines_are_zero() -> TestResult {
        let figures = totals(&[], iso::USD, Decimal::new(8, 2))?;

        assert_eq!(figures.subtotal, Money::from_minor(0, iso::USD));
        assert_eq!(figures.tax, Money::from_minor(0, iso::USD));
        assert_eq!(figures.total, Money::from_minor(0, iso::USD));

        Ok(())
    }

    #[test]
    fn totals_sum_lines_and_apply_tax() -> TestResult {
        let lines = [
            CartLine::new(fixtures::espresso(), qty(3)),
            CartLine::new(fixtures::croissant(), qty(1)),
        ];

        // 3 x 2.50 + 1 x 3.75 = 11.25; 8% tax = 0.90.
        let figures = totals(&lines, iso::USD, Decimal::new(8, 2))?;

        assert_eq!(figures.subtotal, Money::from_minor(11_25, iso::USD));
        assert_eq!(figures.tax, Money::from_minor(90, iso::USD));
        assert_eq!(figures.total, Money::from_minor(12_15, iso::USD));

        Ok(())
    }
}
