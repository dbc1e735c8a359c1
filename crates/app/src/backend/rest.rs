//! REST client for the hosted backend.
//!
//! The backend exposes row CRUD over JSON: `/products`, `/transactions`,
//! `/transaction_items`, and the auth session endpoints `/auth/user` and
//! `/auth/sign_out`. Requests authenticate with the service API key, sent
//! both as the `apikey` header and as a bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tillpoint::products::ProductId;

use crate::{
    backend::{
        Backend, BackendError, DateRange,
        records::{
            NewProductRecord, NewTransactionItemRecord, NewTransactionRecord, ProductPatch,
            ProductRecord, TransactionRecord, UserRecord,
        },
    },
    domain::transactions::models::TransactionId,
};

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct RestBackendConfig {
    /// Backend base URL, e.g. `"https://acme.example.com/rest/v1"`.
    pub base_url: String,

    /// Service API key.
    pub api_key: String,
}

/// HTTP client for the hosted backend's row CRUD and auth endpoints.
#[derive(Debug, Clone)]
pub struct RestBackend {
    config: RestBackendConfig,
    http: Client,
}

impl RestBackend {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RestBackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = self.authed(request).send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Err(BackendError::UnexpectedResponse { status, body })
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, BackendError> {
        let request = self
            .http
            .get(self.url("products"))
            .query(&[("order", "name")]);

        Ok(self.send(request).await?.json().await?)
    }

    async fn create_product(
        &self,
        product: NewProductRecord,
    ) -> Result<ProductRecord, BackendError> {
        let request = self.http.post(self.url("products")).json(&product);

        Ok(self.send(request).await?.json().await?)
    }

    async fn update_product(
        &self,
        product: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductRecord, BackendError> {
        let request = self
            .http
            .patch(self.url(&format!("products/{product}")))
            .json(&patch);

        Ok(self.send(request).await?.json().await?)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), BackendError> {
        let request = self.http.delete(self.url(&format!("products/{product}")));

        self.send(request).await?;

        Ok(())
    }

    async fn update_product_stock(
        &self,
        product: ProductId,
        stock_quantity: u32,
    ) -> Result<(), BackendError> {
        let patch = ProductPatch {
            stock_quantity: Some(i64::from(stock_quantity)),
            ..ProductPatch::default()
        };

        let request = self
            .http
            .patch(self.url(&format!("products/{product}")))
            .json(&patch);

        self.send(request).await?;

        Ok(())
    }

    async fn create_transaction(
        &self,
        transaction: NewTransactionRecord,
    ) -> Result<TransactionRecord, BackendError> {
        let request = self.http.post(self.url("transactions")).json(&transaction);

        Ok(self.send(request).await?.json().await?)
    }

    async fn create_transaction_items(
        &self,
        items: Vec<NewTransactionItemRecord>,
    ) -> Result<(), BackendError> {
        let request = self.http.post(self.url("transaction_items")).json(&items);

        self.send(request).await?;

        Ok(())
    }

    async fn delete_transaction(&self, transaction: TransactionId) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.url(&format!("transactions/{transaction}")));

        self.send(request).await?;

        Ok(())
    }

    async fn list_transactions(
        &self,
        range: Option<DateRange>,
    ) -> Result<Vec<TransactionRecord>, BackendError> {
        let mut params = vec![
            ("order".to_string(), "created_at.desc".to_string()),
            ("nest".to_string(), "items.product".to_string()),
        ];

        if let Some(range) = range {
            if let Some(from) = range.from {
                params.push(("from".to_string(), from.to_string()));
            }

            if let Some(to) = range.to {
                params.push(("to".to_string(), to.to_string()));
            }
        }

        let request = self.http.get(self.url("transactions")).query(&params);

        Ok(self.send(request).await?.json().await?)
    }

    async fn current_user(&self) -> Result<UserRecord, BackendError> {
        let request = self.http.get(self.url("auth/user"));

        Ok(self.send(request).await?.json().await?)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let request = self.http.post(self.url("auth/sign_out"));

        self.send(request).await?;

        Ok(())
    }
}
