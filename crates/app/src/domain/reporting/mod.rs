//! Sales reporting.
//!
//! Pure reductions over a fetched transaction list; no backend calls of
//! its own. Revenue per product uses the price-at-time frozen into each
//! item, so later catalog price changes do not rewrite history.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tillpoint::{
    pricing::{self, PricingError},
    products::ProductId,
};

use crate::domain::transactions::models::Transaction;

/// How many products the revenue ranking keeps.
const TOP_PRODUCTS: usize = 5;

/// Revenue attributed to one product across the reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub product_id: ProductId,
    pub name: String,
    pub revenue: Money<'static, Currency>,
    pub units_sold: u32,
}

/// Aggregate figures for a set of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    /// Sum of transaction totals.
    pub gross_sales: Money<'static, Currency>,

    /// Number of transactions.
    pub transaction_count: usize,

    /// Gross sales divided by transaction count, rounded to minor units.
    /// Zero when there are no transactions.
    pub average_value: Money<'static, Currency>,

    /// Up to five products ranked by revenue, ties broken by name.
    pub top_products: Vec<ProductRevenue>,
}

/// Reduce a transaction list into the sales report.
///
/// Order-independent: the same transactions in any order yield the same
/// report.
///
/// # Errors
///
/// Returns a [`PricingError`] on minor-unit overflow or money arithmetic
/// failure.
pub fn summarize(
    transactions: &[Transaction],
    currency: &'static Currency,
) -> Result<SalesReport, PricingError> {
    let mut gross_sales = Money::from_minor(0, currency);

    for transaction in transactions {
        gross_sales = gross_sales.add(transaction.total)?;
    }

    let average_value = average(&gross_sales, transactions.len(), currency)?;

    let mut by_product: FxHashMap<ProductId, ProductRevenue> = FxHashMap::default();

    for transaction in transactions {
        for item in &transaction.items {
            let item_revenue = pricing::line_total(&item.price_at_time, item.quantity)?;

            match by_product.get_mut(&item.product_id) {
                Some(entry) => {
                    entry.revenue = entry.revenue.add(item_revenue)?;
                    entry.units_sold = entry.units_sold.saturating_add(item.quantity);
                }
                None => {
                    by_product.insert(
                        item.product_id,
                        ProductRevenue {
                            product_id: item.product_id,
                            name: item.display_name(),
                            revenue: item_revenue,
                            units_sold: item.quantity,
                        },
                    );
                }
            }
        }
    }

    let mut top_products: Vec<ProductRevenue> = by_product.into_values().collect();

    top_products.sort_by(|a, b| {
        b.revenue
            .to_minor_units()
            .cmp(&a.revenue.to_minor_units())
            .then_with(|| a.name.cmp(&b.name))
    });
    top_products.truncate(TOP_PRODUCTS);

    Ok(SalesReport {
        gross_sales,
        transaction_count: transactions.len(),
        average_value,
        top_products,
    })
}

fn average(
    gross: &Money<'static, Currency>,
    count: usize,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    if count == 0 {
        return Ok(Money::from_minor(0, currency));
    }

    let Some(gross_minor) = Decimal::from_i64(gross.to_minor_units()) else {
        unreachable!("every i64 is representable as a Decimal")
    };

    let count = Decimal::from_usize(count).ok_or(PricingError::Overflow)?;

    let minor = (gross_minor / count)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}
