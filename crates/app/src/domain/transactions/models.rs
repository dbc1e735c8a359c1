//! Transaction Models
//!
//! Immutable records of completed sales. Item prices are the prices at
//! sale time, deliberately decoupled from the catalog's current prices so
//! historical receipts stay accurate.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use tillpoint::{
    ids::TypedUuid,
    products::{Product, ProductId},
};

use crate::auth::models::UserId;

/// Transaction UUID, assigned by the backend.
pub type TransactionId = TypedUuid<Transaction>;

/// A completed sale. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub subtotal: Money<'static, Currency>,
    pub tax: Money<'static, Currency>,
    pub total: Money<'static, Currency>,
    pub customer_email: Option<String>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub items: Vec<TransactionItem>,
}

/// A frozen snapshot of one cart line at sale time.
#[derive(Debug, Clone)]
pub struct TransactionItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_at_time: Money<'static, Currency>,

    /// The product snapshot, when the backend nested it in the response.
    pub product: Option<Product>,
}

impl TransactionItem {
    /// The product name for display, falling back to the product id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.product
            .as_ref()
            .map_or_else(|| self.product_id.to_string(), |p| p.name().to_string())
    }
}
