//! Wire records for the hosted backend.
//!
//! These mirror the backend's JSON row shapes. Monetary values travel as
//! integer minor units; conversion into validated domain types happens in
//! the `try_into_*` methods, so an invalid record surfaces as an error at
//! the decode boundary rather than as bad state downstream.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tillpoint::products::{Product, ProductError, ProductFields, ProductId};

use crate::{
    auth::models::UserId,
    domain::transactions::models::{Transaction, TransactionId, TransactionItem},
};

/// A record that failed validation while decoding into a domain type.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The product fields violated a catalog invariant.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// A quantity was negative or out of range.
    #[error("quantity {0} is out of range")]
    QuantityOutOfRange(i64),
}

/// Product row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub sku: String,
    pub category: String,
    pub stock_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Decode into a validated catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the stock quantity is negative or the
    /// product fields violate a catalog invariant.
    pub fn try_into_product(
        self,
        currency: &'static Currency,
    ) -> Result<Product, RecordError> {
        let stock_quantity = u32::try_from(self.stock_quantity)
            .map_err(|_| RecordError::QuantityOutOfRange(self.stock_quantity))?;

        let product = Product::new(ProductFields {
            id: self.id,
            name: self.name,
            price: Money::from_minor(self.price, currency),
            sku: self.sku,
            category: self.category,
            stock_quantity,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })?;

        Ok(product)
    }
}

/// Fields for a product create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductRecord {
    pub name: String,
    pub price: i64,
    pub sku: String,
    pub category: String,
    pub stock_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update for a product row. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields for a transaction create request. The backend assigns the id and
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionRecord {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub created_by: UserId,
}

/// Transaction row, with nested items when the backend was asked for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    #[serde(default)]
    pub items: Vec<TransactionItemRecord>,
}

impl TransactionRecord {
    /// Decode into the domain transaction, validating nested products.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if an item quantity is out of range or a
    /// nested product record is invalid.
    pub fn try_into_transaction(
        self,
        currency: &'static Currency,
    ) -> Result<Transaction, RecordError> {
        let mut items = Vec::with_capacity(self.items.len());

        for item in self.items {
            items.push(item.try_into_item(currency)?);
        }

        Ok(Transaction {
            id: self.id,
            subtotal: Money::from_minor(self.subtotal, currency),
            tax: Money::from_minor(self.tax, currency),
            total: Money::from_minor(self.total, currency),
            customer_email: self.customer_email,
            created_by: self.created_by,
            created_at: self.created_at,
            items,
        })
    }
}

/// Fields for one row of a transaction-items batch insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionItemRecord {
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub price_at_time: i64,
}

/// Transaction item row, with the product snapshot when nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItemRecord {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price_at_time: i64,
    #[serde(default)]
    pub product: Option<ProductRecord>,
}

impl TransactionItemRecord {
    fn try_into_item(self, currency: &'static Currency) -> Result<TransactionItem, RecordError> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| RecordError::QuantityOutOfRange(self.quantity))?;

        let product = self
            .product
            .map(|record| record.try_into_product(currency))
            .transpose()?;

        Ok(TransactionItem {
            product_id: self.product_id,
            quantity,
            price_at_time: Money::from_minor(self.price_at_time, currency),
            product,
        })
    }
}

/// The signed-in operator as reported by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn record() -> ProductRecord {
        ProductRecord {
            id: ProductId::from_uuid(Uuid::from_u128(9)),
            name: "Filter Papers".to_string(),
            price: 4_25,
            sku: "FLT-100".to_string(),
            category: "Brewing".to_string(),
            stock_quantity: 8,
            image_url: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn valid_record_decodes() -> TestResult {
        let product = record().try_into_product(iso::USD)?;

        assert_eq!(product.sku(), "FLT-100");
        assert_eq!(product.stock_quantity(), 8);
        assert_eq!(product.price().to_minor_units(), 4_25);

        Ok(())
    }

    #[test]
    fn negative_stock_is_rejected_at_the_boundary() {
        let mut record = record();
        record.stock_quantity = -3;

        assert!(matches!(
            record.try_into_product(iso::USD),
            Err(RecordError::QuantityOutOfRange(-3))
        ));
    }

    #[test]
    fn zero_price_is_rejected_at_the_boundary() {
        let mut record = record();
        record.price = 0;

        assert!(matches!(
            record.try_into_product(iso::USD),
            Err(RecordError::Product(ProductError::NonPositivePrice))
        ));
    }

    #[test]
    fn empty_sku_is_rejected_at_the_boundary() {
        let mut record = record();
        record.sku = String::new();

        assert!(matches!(
            record.try_into_product(iso::USD),
            Err(RecordError::Product(ProductError::EmptySku))
        ));
    }

    #[test]
    fn patch_serializes_only_present_fields() -> TestResult {
        let patch = ProductPatch {
            stock_quantity: Some(4),
            ..ProductPatch::default()
        };

        let json = serde_json::to_value(&patch)?;

        assert_eq!(json, serde_json::json!({ "stock_quantity": 4 }));

        Ok(())
    }
}
