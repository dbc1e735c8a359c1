//! Catalog Models

use rusty_money::{Money, iso::Currency};

use crate::backend::records::{NewProductRecord, ProductPatch};

/// Fields for a new catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Money<'static, Currency>,
    pub sku: String,
    pub category: String,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
}

impl NewProduct {
    pub(crate) fn into_record(self) -> NewProductRecord {
        NewProductRecord {
            name: self.name,
            price: self.price.to_minor_units(),
            sku: self.sku,
            category: self.category,
            stock_quantity: i64::from(self.stock_quantity),
            image_url: self.image_url,
        }
    }
}

/// Partial update to a catalog entry. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money<'static, Currency>>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub stock_quantity: Option<u32>,
    pub image_url: Option<String>,
}

impl ProductUpdate {
    pub(crate) fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            price: self.price.map(|price| price.to_minor_units()),
            sku: self.sku,
            category: self.category,
            stock_quantity: self.stock_quantity.map(i64::from),
            image_url: self.image_url,
        }
    }
}
