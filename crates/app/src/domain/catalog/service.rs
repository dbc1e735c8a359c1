//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use tillpoint::products::{Product, ProductId};

use crate::{
    backend::Backend,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, ProductUpdate},
    },
};

/// Catalog service backed by the hosted backend.
#[derive(Clone)]
pub struct HostedCatalogService {
    backend: Arc<dyn Backend>,
    currency: &'static Currency,
}

impl HostedCatalogService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, currency: &'static Currency) -> Self {
        Self { backend, currency }
    }
}

#[async_trait]
impl CatalogService for HostedCatalogService {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let records = self.backend.list_products().await?;
        let mut products = Vec::with_capacity(records.len());

        for record in records {
            products.push(record.try_into_product(self.currency)?);
        }

        Ok(products)
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Product, CatalogServiceError> {
        let products = self.list_products().await?;

        products
            .into_iter()
            .find(|product| product.sku() == sku)
            .ok_or_else(|| CatalogServiceError::UnknownSku(sku.to_string()))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let record = self.backend.create_product(product.into_record()).await?;

        Ok(record.try_into_product(self.currency)?)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError> {
        let record = self
            .backend
            .update_product(product, update.into_patch())
            .await?;

        Ok(record.try_into_product(self.currency)?)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError> {
        self.backend.delete_product(product).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve all products, sorted by name, validated at the boundary.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Look a product up by its SKU, for scan-to-cart.
    async fn find_by_sku(&self, sku: &str) -> Result<Product, CatalogServiceError>;

    /// Create a new catalog entry.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Update an existing catalog entry.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError>;

    /// Delete a catalog entry.
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError>;
}
