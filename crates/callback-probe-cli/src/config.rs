//! Probe configuration.

use std::fmt;
use std::path::Path;

use callback_probe_client::ClientOptions;
use serde::Deserialize;
use url::Url;

/// Default backend API root.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/v1";
/// Default gateway API root.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.paystack.co";
/// Default frontend origin.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Gateway secrets files, searched in order.
const GATEWAY_SECRET_PATHS: [&str; 2] = [".secrets/paystack.json", "../.secrets/paystack.json"];

/// Frontend route that receives the gateway redirect.
const CONFIRMATION_PATH: &str = "/flights/booking-confirmation";

/// Configuration loaded from environment variables and secrets files.
#[derive(Clone)]
pub struct ProbeConfig {
    /// Backend API root (default: `"http://localhost:8080/api/v1"`).
    pub backend_base_url: String,

    /// Gateway API root (default: `"https://api.paystack.co"`).
    pub gateway_base_url: String,

    /// Gateway secret key (optional; required for direct probes).
    pub gateway_secret_key: Option<String>,

    /// Frontend origin used for callback and confirmation URLs.
    pub frontend_url: String,

    /// Request timeout in seconds; unset waits indefinitely.
    pub request_timeout_seconds: Option<u64>,
}

/// Gateway secrets file structure.
#[derive(Debug, Deserialize)]
struct GatewaySecrets {
    secret_key: String,
}

impl ProbeConfig {
    /// Load configuration from environment variables and secrets files.
    ///
    /// The gateway key is read from `.secrets/paystack.json` when present,
    /// falling back to `PAYSTACK_SECRET_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        let paths = GATEWAY_SECRET_PATHS.map(Path::new);
        Self::from_sources(|key| std::env::var(key).ok(), &paths)
    }

    /// Build configuration from a variable lookup, letting the first readable
    /// secrets file in `secret_paths` supply the gateway key.
    #[must_use]
    pub fn from_sources<F>(lookup: F, secret_paths: &[&Path]) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_lookup(lookup);
        if let Some(key) = load_gateway_secret_file(secret_paths) {
            config.gateway_secret_key = Some(key);
        }
        config
    }

    /// Build configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            backend_base_url: non_empty("PROBE_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.into()),
            gateway_base_url: non_empty("PAYSTACK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.into()),
            gateway_secret_key: non_empty("PAYSTACK_SECRET_KEY"),
            frontend_url: non_empty("PROBE_FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.into()),
            request_timeout_seconds: non_empty("PROBE_TIMEOUT_SECONDS")
                .and_then(|s| s.trim().parse().ok()),
        }
    }

    /// HTTP client options derived from this configuration.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout_seconds: self.request_timeout_seconds,
        }
    }

    /// Callback URL pointing at the frontend confirmation page.
    #[must_use]
    pub fn default_callback_url(&self) -> String {
        format!(
            "{}{CONFIRMATION_PATH}",
            self.frontend_url.trim_end_matches('/')
        )
    }

    /// Confirmation page URL for a payment reference, for manual redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend URL is not a valid absolute URL.
    pub fn confirmation_url(&self, reference: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.default_callback_url())?;
        url.query_pairs_mut().append_pair("reference", reference);
        Ok(url)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_URL.into(),
            gateway_base_url: DEFAULT_GATEWAY_URL.into(),
            gateway_secret_key: None,
            frontend_url: DEFAULT_FRONTEND_URL.into(),
            request_timeout_seconds: None,
        }
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("backend_base_url", &self.backend_base_url)
            .field("gateway_base_url", &self.gateway_base_url)
            .field(
                "gateway_secret_key",
                &self.gateway_secret_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("frontend_url", &self.frontend_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

/// Load the gateway key from the first secrets file found.
fn load_gateway_secret_file(secret_paths: &[&Path]) -> Option<String> {
    for path in secret_paths {
        if let Ok(secrets) = load_secrets_file::<GatewaySecrets>(path) {
            tracing::info!(path = %path.display(), "Loaded gateway secret from file");
            return Some(secrets.secret_key).filter(|k| !k.trim().is_empty());
        }
    }

    tracing::debug!("Gateway secrets file not found, using environment variables");
    None
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, std::io::Error> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
