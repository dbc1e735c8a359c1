//! Catalog service errors.

use thiserror::Error;

use crate::backend::{BackendError, records::RecordError};

/// Errors raised by the catalog service.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// No product carries the given SKU.
    #[error("no product with SKU {0}")]
    UnknownSku(String),

    /// The backend returned a record that failed validation.
    #[error("invalid product record from backend")]
    InvalidRecord(#[from] RecordError),

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
