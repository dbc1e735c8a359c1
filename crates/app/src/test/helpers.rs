//! Test Helpers

use std::num::NonZeroU32;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tillpoint::{
    pricing,
    products::{Product, ProductId},
};
use uuid::Uuid;

use crate::{
    auth::models::UserId,
    backend::records::{
        NewProductRecord, NewTransactionRecord, ProductRecord, TransactionRecord,
    },
    domain::transactions::models::{Transaction, TransactionId, TransactionItem},
};

pub(crate) fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("test quantities are non-zero")
}

pub(crate) fn cashier() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xCA01))
}

pub(crate) fn product_record(
    id: u128,
    name: &str,
    price: i64,
    sku: &str,
    stock_quantity: i64,
) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_uuid(Uuid::from_u128(id)),
        name: name.to_string(),
        price,
        sku: sku.to_string(),
        category: "General".to_string(),
        stock_quantity,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Echo a create request back as the stored record, the way the backend
/// responds to an insert.
pub(crate) fn created_record(id: u128, record: NewProductRecord) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_uuid(Uuid::from_u128(id)),
        name: record.name,
        price: record.price,
        sku: record.sku,
        category: record.category,
        stock_quantity: record.stock_quantity,
        image_url: record.image_url,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Echo a transaction create request back as the stored record.
pub(crate) fn transaction_response(id: u128, record: NewTransactionRecord) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::from_uuid(Uuid::from_u128(id)),
        subtotal: record.subtotal,
        tax: record.tax,
        total: record.total,
        customer_email: record.customer_email,
        created_by: record.created_by,
        created_at: Timestamp::UNIX_EPOCH,
        items: Vec::new(),
    }
}

pub(crate) fn transaction_record(
    id: u128,
    subtotal: i64,
    tax: i64,
    total: i64,
) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::from_uuid(Uuid::from_u128(id)),
        subtotal,
        tax,
        total,
        customer_email: None,
        created_by: cashier(),
        created_at: Timestamp::UNIX_EPOCH,
        items: Vec::new(),
    }
}

/// One transaction item for a whole product snapshot at its current price.
pub(crate) fn unit_item(product: &Product, quantity: u32) -> TransactionItem {
    TransactionItem {
        product_id: product.id(),
        quantity,
        price_at_time: *product.price(),
        product: Some(product.clone()),
    }
}

/// A domain transaction whose figures are derived from its items at an 8%
/// tax rate.
pub(crate) fn transaction_with_items(id: u128, items: Vec<TransactionItem>) -> Transaction {
    let mut subtotal = Money::from_minor(0, iso::USD);

    for item in &items {
        let line = pricing::line_total(&item.price_at_time, item.quantity)
            .expect("test line totals stay in range");
        subtotal = subtotal.add(line).expect("test currencies match");
    }

    let tax = pricing::tax_on(&subtotal, Decimal::new(8, 2)).expect("test tax stays in range");
    let total = subtotal.add(tax).expect("test currencies match");

    Transaction {
        id: TransactionId::from_uuid(Uuid::from_u128(id)),
        subtotal,
        tax,
        total,
        customer_email: None,
        created_by: cashier(),
        created_at: Timestamp::UNIX_EPOCH,
        items,
    }
}
