//! Booking backend and payment gateway clients.

use std::fmt;
use std::time::Duration;

use callback_probe_core::{BookingRequest, TransactionInit};
use tracing::{info, warn};
use url::Url;

use crate::classify::{classify_backend, classify_gateway, PaymentLink};
use crate::dispatch::Dispatcher;
use crate::error::ProbeError;

/// Booking endpoint, relative to the backend base URL.
pub const BOOKING_PATH: &str = "/products/flights/book";

/// Transaction initialization endpoint, relative to the gateway base URL.
pub const INITIALIZE_PATH: &str = "/transaction/initialize";

/// Client options for customization.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Overall request timeout in seconds. `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout_seconds: Some(seconds),
        }
    }

    fn dispatcher(&self) -> Result<Dispatcher, ProbeError> {
        Dispatcher::new(self.timeout_seconds.map(Duration::from_secs))
    }
}

/// Client for the flight booking backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    dispatcher: Dispatcher,
    base_url: String,
}

impl BackendClient {
    /// Create a backend client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root of the backend (e.g., `"http://localhost:8080/api/v1"`)
    /// * `options` - Client options
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>, options: ClientOptions) -> Result<Self, ProbeError> {
        Ok(Self {
            dispatcher: options.dispatcher()?,
            base_url: normalize_base_url(base_url.into())?,
        })
    }

    /// Full URL of the booking endpoint.
    #[must_use]
    pub fn booking_url(&self) -> String {
        format!("{}{BOOKING_PATH}", self.base_url)
    }

    /// Submit a booking and classify the response.
    ///
    /// Each call may create a booking and a payment session on the backend.
    ///
    /// # Errors
    ///
    /// Returns a transport, parse or application error.
    pub async fn book(&self, booking: &BookingRequest) -> Result<PaymentLink, ProbeError> {
        let body = self
            .dispatcher
            .post_json(&self.booking_url(), booking, None)
            .await?;

        match classify_backend(&body) {
            Ok(link) => {
                info!(reference = %link.reference, "Booking created");
                Ok(link)
            }
            Err(e) => {
                warn!(message = %e.message, "Booking rejected");
                Err(e.into())
            }
        }
    }
}

/// Client for the payment gateway's REST API.
#[derive(Clone)]
pub struct GatewayClient {
    dispatcher: Dispatcher,
    base_url: String,
    secret_key: String,
}

impl GatewayClient {
    /// Create a gateway client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Gateway API root (e.g., `"https://api.paystack.co"`)
    /// * `secret_key` - Secret API key (`sk_test_...` or `sk_live_...`)
    /// * `options` - Client options
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL, `secret_key` is
    /// empty, or the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ProbeError> {
        let secret_key = secret_key.into();
        if secret_key.trim().is_empty() {
            return Err(ProbeError::Configuration(
                "gateway secret key is empty".into(),
            ));
        }

        Ok(Self {
            dispatcher: options.dispatcher()?,
            base_url: normalize_base_url(base_url.into())?,
            secret_key,
        })
    }

    /// Full URL of the initialization endpoint.
    #[must_use]
    pub fn initialize_url(&self) -> String {
        format!("{}{INITIALIZE_PATH}", self.base_url)
    }

    /// Initialize a transaction directly, bypassing the backend.
    ///
    /// # Errors
    ///
    /// Returns a transport, parse or application error.
    pub async fn initialize_transaction(
        &self,
        init: &TransactionInit,
    ) -> Result<PaymentLink, ProbeError> {
        let body = self
            .dispatcher
            .post_json(&self.initialize_url(), init, Some(&self.secret_key))
            .await?;

        match classify_gateway(&body) {
            Ok(link) => {
                info!(reference = %link.reference, "Transaction initialized");
                Ok(link)
            }
            Err(e) => {
                warn!(message = %e.message, "Transaction rejected");
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.base_url)
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Validate an absolute base URL and strip trailing slashes.
///
/// Endpoint paths are appended to the string, so a query or fragment would
/// swallow them.
fn normalize_base_url(raw: String) -> Result<String, ProbeError> {
    let url = Url::parse(&raw)?;
    if url.cannot_be_a_base() {
        return Err(ProbeError::Configuration(format!(
            "base URL cannot carry a path: {raw}"
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ProbeError::Configuration(format!(
            "base URL must not have a query or fragment: {raw}"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_client_trims_trailing_slash() {
        let client =
            BackendClient::new("http://localhost:8080/api/v1/", ClientOptions::default()).unwrap();
        assert_eq!(
            client.booking_url(),
            "http://localhost:8080/api/v1/products/flights/book"
        );
    }

    #[test]
    fn backend_client_rejects_relative_url() {
        let err = BackendClient::new("/api/v1", ClientOptions::default()).unwrap_err();
        assert!(matches!(err, ProbeError::InvalidUrl(_)));
    }

    #[test]
    fn backend_client_rejects_non_base_url() {
        let err = BackendClient::new("mailto:ops@example.com", ClientOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }

    #[test]
    fn base_url_with_query_or_fragment_is_rejected() {
        for raw in ["http://h/api?x=1", "http://h/api#top", "http://h/api?"] {
            let err = BackendClient::new(raw, ClientOptions::default()).unwrap_err();
            assert!(matches!(err, ProbeError::Configuration(_)), "{raw}");
        }
    }

    #[test]
    fn gateway_client_url() {
        let client =
            GatewayClient::new("https://api.paystack.co", "sk_test_x", ClientOptions::default())
                .unwrap();
        assert_eq!(
            client.initialize_url(),
            "https://api.paystack.co/transaction/initialize"
        );
    }

    #[test]
    fn gateway_client_requires_key() {
        let err = GatewayClient::new("https://api.paystack.co", "  ", ClientOptions::default())
            .unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }

    #[test]
    fn gateway_client_debug_redacts_key() {
        let client = GatewayClient::new(
            "https://api.paystack.co",
            "sk_test_do_not_print",
            ClientOptions::with_timeout_seconds(5),
        )
        .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk_test_do_not_print"));
    }
}
