//! Error types for booking construction.

/// Result type for payload construction.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Errors raised while building a booking or gateway payload.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Amount must be a positive number of minor units.
    #[error("invalid amount: {0} (must be a positive integer in minor units)")]
    InvalidAmount(u64),

    /// Currency must be a three-letter ISO code.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Callback URL is not an absolute http(s) URL.
    #[error("invalid callback URL {url:?}: {reason}")]
    InvalidCallbackUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Contact email is missing or obviously malformed.
    #[error("invalid email: {0:?}")]
    InvalidEmail(String),
}
