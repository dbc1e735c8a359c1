//! Cart lines
//!
//! One line pairs a product snapshot with the quantity requested for the
//! active sale.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{self, PricingError},
    products::Product,
};

/// One entry in the cart ledger.
#[derive(Debug, Clone)]
pub struct CartLine {
    product: Product,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Create a line holding the given product snapshot and quantity.
    #[must_use]
    pub fn new(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// The product snapshot captured when the line was created.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The requested quantity. Always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity for this line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the product overflows minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, PricingError> {
        pricing::line_total(self.product.price(), self.quantity())
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}
