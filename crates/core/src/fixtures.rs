//! Catalog fixtures for tests and examples.

use jiff::Timestamp;
use rusty_money::{Money, iso};
use uuid::Uuid;

use crate::products::{Product, ProductFields, ProductId};

/// Espresso, 2.50 USD, 100 in stock.
#[must_use]
pub fn espresso() -> Product {
    product(1, "Espresso", 2_50, "ESP-001", "Drinks", 100)
}

/// Butter croissant, 3.75 USD, 12 in stock.
#[must_use]
pub fn croissant() -> Product {
    product(2, "Butter Croissant", 3_75, "CRO-010", "Bakery", 12)
}

/// Branded mug, 9.00 USD, 2 in stock.
#[must_use]
pub fn mug() -> Product {
    product(3, "Branded Mug", 9_00, "MUG-032", "Merch", 2)
}

/// House blend beans, 10.00 USD, 5 in stock.
#[must_use]
pub fn beans() -> Product {
    product(4, "House Blend Beans", 10_00, "BEAN-001", "Coffee", 5)
}

/// Gift card with an exhausted stock record.
#[must_use]
pub fn out_of_stock() -> Product {
    product(5, "Gift Card", 25_00, "GIFT-25", "Merch", 0)
}

/// Decaf blend beans, 11.00 USD, 20 in stock.
#[must_use]
pub fn decaf() -> Product {
    product(6, "Decaf Blend Beans", 11_00, "BEAN-002", "Coffee", 20)
}

fn product(
    id: u128,
    name: &str,
    price_minor: i64,
    sku: &str,
    category: &str,
    stock_quantity: u32,
) -> Product {
    let fields = ProductFields {
        id: ProductId::from_uuid(Uuid::from_u128(id)),
        name: name.to_string(),
        price: Money::from_minor(price_minor, iso::USD),
        sku: sku.to_string(),
        category: category.to_string(),
        stock_quantity,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    };

    match Product::new(fields) {
        Ok(product) => product,
        Err(_) => unreachable!("fixture products are statically valid"),
    }
}
