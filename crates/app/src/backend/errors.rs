//! Backend client errors.

use thiserror::Error;

/// Errors that can occur when communicating with the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response.
    #[error("unexpected response from backend: status {status}: {body}")]
    UnexpectedResponse {
        /// HTTP status code of the failed request.
        status: u16,

        /// Response body, as far as it could be read.
        body: String,
    },
}
