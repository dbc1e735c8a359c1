//! Product catalog.
//!
//! Admin CRUD passes through to the backend; searching, category listing
//! and SKU lookup are client-side reductions over the fetched list, the
//! way the register screen filters an already-loaded catalog.

use tillpoint::products::Product;

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::{CatalogService, HostedCatalogService, MockCatalogService};

/// Filter products by a name/SKU substring and an optional category.
///
/// The query matches case-insensitively against name and SKU; an empty
/// query matches everything.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let query = query.to_lowercase();

    products
        .iter()
        .filter(|product| {
            let matches_query = query.is_empty()
                || product.name().to_lowercase().contains(&query)
                || product.sku().to_lowercase().contains(&query);

            let matches_category =
                category.is_none_or(|category| product.category() == category);

            matches_query && matches_category
        })
        .collect()
}

/// Distinct category labels, in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();

    for product in products {
        if !seen.iter().any(|existing| existing == product.category()) {
            seen.push(product.category().to_string());
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use tillpoint::fixtures;

    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            fixtures::espresso(),
            fixtures::croissant(),
            fixtures::mug(),
            fixtures::beans(),
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let products = catalog();

        assert_eq!(filter_products(&products, "", None).len(), products.len());
    }

    #[test]
    fn query_matches_name_and_sku_case_insensitively() {
        let products = catalog();

        let by_name = filter_products(&products, "espresso", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].sku(), "ESP-001");

        let by_sku = filter_products(&products, "cro-", None);
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].name(), "Butter Croissant");
    }

    #[test]
    fn category_filter_composes_with_the_query() {
        let products = catalog();

        let merch = filter_products(&products, "", Some("Merch"));
        assert_eq!(merch.len(), 1);
        assert_eq!(merch[0].name(), "Branded Mug");

        let none = filter_products(&products, "espresso", Some("Merch"));
        assert!(none.is_empty());
    }

    #[test]
    fn categories_are_distinct_and_ordered_by_first_appearance() {
        let products = catalog();

        assert_eq!(
            categories(&products),
            vec!["Drinks", "Bakery", "Merch", "Coffee"]
        );
    }
}
