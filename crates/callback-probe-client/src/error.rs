//! Client error types.

use callback_probe_core::BookingError;

/// Errors that can occur while probing an endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The request did not complete: refused, DNS, timeout or body read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("response (HTTP {status}) is not valid JSON: {source}")]
    Parse {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying parse error.
        source: serde_json::Error,
        /// Raw response body.
        body: String,
    },

    /// The request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Well-formed response reporting a failure, or an unrecognised shape.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A base URL is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The payload could not be built.
    #[error("invalid payload: {0}")]
    Booking(#[from] BookingError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Business-level failure reported by a well-formed JSON response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("application error: {message}")]
pub struct ApplicationError {
    /// The response's `message`, or a description of what was missing.
    pub message: String,
    /// The full response body.
    pub response: serde_json::Value,
}
