//! Single-shot JSON POST.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::ProbeError;

/// Sends one JSON POST and parses the JSON reply.
///
/// The reply is parsed whatever the HTTP status, since both endpoints put a
/// JSON error body on 4xx responses.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    /// Create a dispatcher. With `timeout` unset, requests wait indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProbeError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProbeError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// POST `body` as JSON to `url` and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::Serialization`] if `body` cannot be serialized
    /// - [`ProbeError::Transport`] if the request or body read fails
    /// - [`ProbeError::Parse`] if the response body is not JSON
    #[instrument(skip(self, body, bearer), fields(authenticated = bearer.is_some()))]
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<Value, ProbeError> {
        // Serialized here rather than via `RequestBuilder::json` so an
        // unserializable body is not reported as a transport error.
        let payload = serde_json::to_vec(body).map_err(ProbeError::Serialization)?;

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "Response received");

        serde_json::from_str(&text).map_err(|source| ProbeError::Parse {
            status: status.as_u16(),
            source,
            body: text,
        })
    }
}
