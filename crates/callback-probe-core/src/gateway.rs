//! Direct transaction-initialization payload.

use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::CurrencyCode;
use crate::builder::{checked_callback_url, validate_email};
use crate::error::{BookingError, Result};

/// Prefix of references generated for direct gateway probes.
pub const DIRECT_REFERENCE_PREFIX: &str = "CBP-DIRECT";

/// Body of `POST /transaction/initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInit {
    /// Customer email.
    pub email: String,
    /// Amount in minor units.
    pub amount: NonZeroU64,
    /// Merchant reference; must be unique per initialization.
    pub reference: String,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// Where the gateway redirects the user after payment.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub callback_url: Option<String>,
}

impl TransactionInit {
    /// Build a probe initialization with a reference derived from `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is zero, `email` is not `local@domain`,
    /// `currency` is not a three-letter code, or `callback_url` is not an
    /// absolute http(s) URL.
    pub fn probe(
        email: impl Into<String>,
        amount: u64,
        currency: &str,
        callback_url: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let amount = NonZeroU64::new(amount).ok_or(BookingError::InvalidAmount(amount))?;
        let email = email.into();
        validate_email(&email)?;

        Ok(Self {
            email,
            amount,
            reference: format!("{DIRECT_REFERENCE_PREFIX}-{}", now.timestamp_millis()),
            currency: currency.parse()?,
            callback_url: callback_url.map(checked_callback_url).transpose()?,
        })
    }
}
