//! Barcode capture.
//!
//! Decoding a barcode out of a captured frame is an external capability:
//! this module only defines the seam and the scan-to-cart composition.
//! No decoder is bundled.

use std::num::NonZeroU32;

use thiserror::Error;
use tillpoint::{
    ledger::{CartLedger, LedgerError},
    products::Product,
};

use crate::domain::catalog::{CatalogService, CatalogServiceError};

/// Errors raised while decoding a captured frame.
#[derive(Debug, Error)]
pub enum BarcodeError {
    /// No barcode could be found in the frame.
    #[error("no barcode detected in the captured frame")]
    NotDetected,

    /// The decoder failed for another reason.
    #[error("barcode decoder failure: {0}")]
    Decoder(String),
}

/// Errors raised by the scan-to-cart composition.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The frame could not be decoded.
    #[error(transparent)]
    Barcode(#[from] BarcodeError),

    /// The decoded SKU did not resolve to a product.
    #[error(transparent)]
    Catalog(#[from] CatalogServiceError),

    /// The product could not be added to the cart.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Decodes a SKU out of a captured image frame.
pub trait BarcodeDecoder: Send + Sync {
    /// Extract the SKU encoded in `frame`.
    ///
    /// # Errors
    ///
    /// Returns a [`BarcodeError`] if no barcode is present or decoding
    /// fails.
    fn decode(&self, frame: &[u8]) -> Result<String, BarcodeError>;
}

/// Decode a frame, resolve the SKU in the catalog, and add one unit of the
/// product to the cart.
///
/// # Errors
///
/// Returns a [`ScanError`] if decoding, SKU lookup, or the cart mutation
/// fails; the ledger is left unchanged on failure.
pub async fn scan_into_cart(
    decoder: &dyn BarcodeDecoder,
    catalog: &dyn CatalogService,
    ledger: &mut CartLedger,
    frame: &[u8],
) -> Result<Product, ScanError> {
    let sku = decoder.decode(frame)?;
    let product = catalog.find_by_sku(&sku).await?;

    ledger.add(&product, NonZeroU32::MIN)?;

    Ok(product)
}
