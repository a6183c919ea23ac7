//! Probe scenarios.
//!
//! Every scenario writes a line-oriented report and returns `Ok(true)` only if
//! all of its probes produced a payment link. Probe failures are reported and
//! never stop the remaining steps; only writer errors are returned.

use std::io::{self, Write};

use callback_probe_client::{BackendClient, GatewayClient, PaymentLink, ProbeError};
use callback_probe_core::{build_booking, BookingDefaults, BookingOverrides, TransactionInit};
use chrono::Utc;
use tracing::{info, warn};

use crate::config::ProbeConfig;

/// Longest raw body excerpt echoed for non-JSON responses.
const BODY_EXCERPT_CHARS: usize = 200;

/// Parameters for a direct gateway initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRequest {
    /// Customer email.
    pub email: String,
    /// Amount in minor units.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Callback URL; the configured frontend page when unset.
    pub callback_url: Option<String>,
}

impl Default for DirectRequest {
    fn default() -> Self {
        Self {
            email: "direct.test@example.com".into(),
            amount: 500_000,
            currency: "NGN".into(),
            callback_url: None,
        }
    }
}

/// Runs probes against the configured backend and gateway.
#[derive(Debug)]
pub struct Prober {
    config: ProbeConfig,
    defaults: BookingDefaults,
    backend: BackendClient,
    gateway: Option<GatewayClient>,
}

impl Prober {
    /// Create a prober. The gateway client is only built when a secret key is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or an HTTP client cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let options = config.client_options();
        let backend = BackendClient::new(config.backend_base_url.clone(), options.clone())?;
        let gateway = config
            .gateway_secret_key
            .as_ref()
            .map(|key| GatewayClient::new(config.gateway_base_url.clone(), key.clone(), options))
            .transpose()?;

        Ok(Self {
            config,
            defaults: BookingDefaults::default(),
            backend,
            gateway,
        })
    }

    /// Replace the fixture that bookings are built from.
    #[must_use]
    pub fn with_defaults(mut self, defaults: BookingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Create one booking through the backend.
    ///
    /// On success the report also carries the confirmation page URL, for
    /// completing the redirect by hand.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub async fn book<W: Write>(
        &self,
        out: &mut W,
        overrides: BookingOverrides,
    ) -> io::Result<bool> {
        let overrides = self.with_default_callback(overrides);
        let link = self.backend_probe(out, "booking", &overrides).await?;

        if let Some(link) = link {
            match self.config.confirmation_url(&link.reference) {
                Ok(url) => writeln!(out, "  confirm manually:  {url}")?,
                Err(e) => warn!(error = %e, "Frontend URL is invalid"),
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Initialize a transaction directly with the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub async fn direct<W: Write>(
        &self,
        out: &mut W,
        request: &DirectRequest,
    ) -> io::Result<bool> {
        let label = "direct";
        let Some(gateway) = &self.gateway else {
            writeln!(out, "{label}: skipped: PAYSTACK_SECRET_KEY is not configured")?;
            warn!("Direct probe skipped, no gateway secret key");
            return Ok(false);
        };

        let callback = request
            .callback_url
            .clone()
            .unwrap_or_else(|| self.config.default_callback_url());
        writeln!(out, "{label}: POST {}", gateway.initialize_url())?;
        writeln!(out, "  callback url:      {callback}")?;

        let init = match TransactionInit::probe(
            request.email.clone(),
            request.amount,
            &request.currency,
            Some(&callback),
            Utc::now(),
        ) {
            Ok(init) => init,
            Err(e) => {
                writeln!(out, "{label}: invalid payload: {e}")?;
                return Ok(false);
            }
        };
        writeln!(out, "  reference:         {}", init.reference)?;

        info!(reference = %init.reference, "Running direct probe");
        let result = gateway.initialize_transaction(&init).await;
        Ok(report(out, label, &result)?.is_some())
    }

    /// Direct gateway initialization followed by a backend booking with the
    /// same callback URL.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub async fn compare<W: Write>(
        &self,
        out: &mut W,
        callback_url: Option<String>,
    ) -> io::Result<bool> {
        let callback = callback_url.unwrap_or_else(|| self.config.default_callback_url());

        let direct = DirectRequest {
            callback_url: Some(callback.clone()),
            ..DirectRequest::default()
        };
        let direct_ok = self.direct(out, &direct).await?;
        writeln!(out)?;

        let overrides = BookingOverrides::new()
            .with_flight_id("final-callback-test")
            .with_passenger_id("passenger-final-test")
            .with_email("final.test@example.com")
            .with_callback_url(callback);
        let backend_ok = self
            .backend_probe(out, "backend", &overrides)
            .await?
            .is_some();

        writeln!(out)?;
        writeln!(
            out,
            "summary: direct={} backend={}",
            verdict(direct_ok),
            verdict(backend_ok)
        )?;
        Ok(direct_ok && backend_ok)
    }

    /// One backend booking per callback URL, issued sequentially.
    ///
    /// An empty list sweeps [`BookingDefaults::callback_variants`].
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the report fails.
    pub async fn variants<W: Write>(
        &self,
        out: &mut W,
        callbacks: Vec<String>,
    ) -> io::Result<bool> {
        let callbacks = if callbacks.is_empty() {
            BookingDefaults::callback_variants()
        } else {
            callbacks
        };

        let mut verdicts = Vec::with_capacity(callbacks.len());
        for (i, callback) in callbacks.into_iter().enumerate() {
            let n = i + 1;
            if n > 1 {
                writeln!(out)?;
            }
            let overrides = BookingOverrides::numbered(n).with_callback_url(callback);
            let ok = self
                .backend_probe(out, &format!("variant {n}"), &overrides)
                .await?
                .is_some();
            verdicts.push(ok);
        }

        let passed = verdicts.iter().filter(|ok| **ok).count();
        writeln!(out)?;
        writeln!(
            out,
            "summary: {passed}/{} variants produced payment links",
            verdicts.len()
        )?;
        Ok(passed == verdicts.len())
    }

    fn with_default_callback(&self, mut overrides: BookingOverrides) -> BookingOverrides {
        if overrides.callback_url.is_none() {
            overrides.callback_url = Some(self.config.default_callback_url());
        }
        overrides
    }

    /// Build, send and report one booking.
    async fn backend_probe<W: Write>(
        &self,
        out: &mut W,
        label: &str,
        overrides: &BookingOverrides,
    ) -> io::Result<Option<PaymentLink>> {
        writeln!(out, "{label}: POST {}", self.backend.booking_url())?;

        let booking = match build_booking(&self.defaults, overrides) {
            Ok(booking) => booking,
            Err(e) => {
                writeln!(out, "{label}: invalid payload: {e}")?;
                return Ok(None);
            }
        };
        if let Some(url) = &booking.payment_details.callback_url {
            writeln!(out, "  callback url:      {url}")?;
        }

        info!(flight_id = %booking.flight_details.id, "Running booking probe");
        let result = self.backend.book(&booking).await;
        report(out, label, &result)
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "failed"
    }
}

/// Write the outcome of one probe and hand back the link on success.
fn report<W: Write>(
    out: &mut W,
    label: &str,
    result: &Result<PaymentLink, ProbeError>,
) -> io::Result<Option<PaymentLink>> {
    match result {
        Ok(link) => {
            writeln!(out, "{label}: ok")?;
            writeln!(out, "  authorization url: {}", link.authorization_url)?;
            writeln!(out, "  payment reference: {}", link.reference)?;
            return Ok(Some(link.clone()));
        }
        Err(ProbeError::Application(e)) => {
            writeln!(out, "{label}: rejected: {}", e.message)?;
            writeln!(out, "  response:          {}", e.response)?;
        }
        Err(ProbeError::Parse { status, body, .. }) => {
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            writeln!(out, "{label}: error: response (HTTP {status}) is not JSON")?;
            writeln!(out, "  body:              {excerpt}")?;
        }
        Err(e) => writeln!(out, "{label}: error: {e}")?,
    }
    Ok(None)
}
