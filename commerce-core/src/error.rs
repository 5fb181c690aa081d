//! Error types for the catalog API client.
//!
//! # Design
//! A single `Http` variant covers every non-2xx status — the backend contract
//! makes no distinction between 4xx and 5xx and sends no structured error
//! body, so the error carries only the status and the transport's status
//! text. Serialization and decoding failures get their own variants since
//! they are local bugs rather than backend responses.

use thiserror::Error;

/// Errors returned by `CatalogClient` parse and build methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200–299.
    #[error("API error: {status_text}")]
    Http { status: u16, status_text: String },

    /// The request payload could not be serialized to JSON.
    #[error("request serialization failed: {0}")]
    Serialize(String),

    /// The response body could not be decoded into the expected type.
    #[error("response decoding failed: {0}")]
    Decode(String),
}
