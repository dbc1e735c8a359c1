//! Products
//!
//! Catalog snapshots as held by the client. The backend owns the records;
//! [`Product::new`] validates them once, at the decode boundary, so every
//! `Product` in circulation satisfies the catalog invariants.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::ids::TypedUuid;

/// Product identifier, assigned by the backend.
pub type ProductId = TypedUuid<Product>;

/// Violations of the catalog invariants, caught at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product name was empty or whitespace.
    #[error("product name must not be empty")]
    EmptyName,

    /// The SKU was empty or whitespace.
    #[error("product SKU must not be empty")]
    EmptySku,

    /// The unit price was zero or negative.
    #[error("product price must be positive")]
    NonPositivePrice,
}

/// Unvalidated product fields, as decoded from a backend record.
#[derive(Debug, Clone)]
pub struct ProductFields {
    /// Backend-assigned identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money<'static, Currency>,

    /// Stock-keeping-unit code, the scan/lookup key.
    pub sku: String,

    /// Category label.
    pub category: String,

    /// Units recorded in stock.
    pub stock_quantity: u32,

    /// Optional image reference.
    pub image_url: Option<String>,

    /// Record creation time.
    pub created_at: Timestamp,

    /// Record update time.
    pub updated_at: Timestamp,
}

/// A validated catalog snapshot.
///
/// The stock quantity reflects the backend's record at the time the snapshot
/// was taken; it is not refreshed by cart mutations.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money<'static, Currency>,
    sku: String,
    category: String,
    stock_quantity: u32,
    image_url: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Product {
    /// Validate fields into a product snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the name or SKU is empty, or the price
    /// is not strictly positive.
    pub fn new(fields: ProductFields) -> Result<Self, ProductError> {
        if fields.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }

        if fields.sku.trim().is_empty() {
            return Err(ProductError::EmptySku);
        }

        if fields.price.to_minor_units() <= 0 {
            return Err(ProductError::NonPositivePrice);
        }

        Ok(Self {
            id: fields.id,
            name: fields.name,
            price: fields.price,
            sku: fields.sku,
            category: fields.category,
            stock_quantity: fields.stock_quantity,
            image_url: fields.image_url,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        })
    }

    /// Backend-assigned identifier.
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Stock-keeping-unit code.
    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Category label.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units recorded in stock when the snapshot was taken.
    #[must_use]
    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Optional image reference.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Record creation time.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Record update time.
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
