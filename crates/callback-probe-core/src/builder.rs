//! Booking request construction.
//!
//! [`build_booking`] layers a handful of scalar [`BookingOverrides`] onto a
//! [`BookingDefaults`] fixture and validates the result. It performs no I/O and
//! gives identical output for identical input.

use std::num::NonZeroU64;

use url::Url;

use crate::booking::{
    BookingRequest, ContactInfo, CurrencyCode, FlightDetails, FlightEndpoint, FlightSegment,
    GuestContactInfo, Itinerary, Passenger, PassengerName, PaymentDetails, PaymentMethod, Phone,
    Price,
};
use crate::defaults::BookingDefaults;
use crate::error::{BookingError, Result};

/// Caller-supplied values that replace fixture defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingOverrides {
    /// Flight offer id.
    pub flight_id: Option<String>,
    /// Passenger id.
    pub passenger_id: Option<String>,
    /// Passenger given name.
    pub first_name: Option<String>,
    /// Passenger family name.
    pub last_name: Option<String>,
    /// Contact email (passenger and guest contact).
    pub email: Option<String>,
    /// Callback URL.
    pub callback_url: Option<String>,
    /// Amount in minor units.
    pub amount: Option<u64>,
    /// Currency code.
    pub currency: Option<String>,
    /// Guest booking flag.
    pub guest: Option<bool>,
}

impl BookingOverrides {
    /// Create empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities for the `n`th booking of a callback sweep (1-based).
    #[must_use]
    pub fn numbered(n: usize) -> Self {
        Self {
            flight_id: Some(format!("test-callback-{n}")),
            passenger_id: Some(format!("passenger-{n}")),
            first_name: Some("Test".into()),
            last_name: Some(format!("Callback{n}")),
            email: Some(format!("test{n}@example.com")),
            ..Self::default()
        }
    }

    /// Set the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the flight id.
    #[must_use]
    pub fn with_flight_id(mut self, id: impl Into<String>) -> Self {
        self.flight_id = Some(id.into());
        self
    }

    /// Set the passenger id.
    #[must_use]
    pub fn with_passenger_id(mut self, id: impl Into<String>) -> Self {
        self.passenger_id = Some(id.into());
        self
    }

    /// Set the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the amount in minor units.
    #[must_use]
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set whether this is a guest booking.
    #[must_use]
    pub fn with_guest(mut self, guest: bool) -> Self {
        self.guest = Some(guest);
        self
    }
}

/// Build a validated booking request.
///
/// # Errors
///
/// Returns an error if the amount is zero, the currency is not a three-letter
/// code, the callback URL is not an absolute http(s) URL, or the email is
/// not `local@domain`. A valid callback URL is kept exactly as given.
pub fn build_booking(
    defaults: &BookingDefaults,
    overrides: &BookingOverrides,
) -> Result<BookingRequest> {
    let pick = |value: &Option<String>, fallback: &String| {
        value.clone().unwrap_or_else(|| fallback.clone())
    };

    let amount_raw = overrides.amount.unwrap_or(defaults.amount);
    let amount = NonZeroU64::new(amount_raw).ok_or(BookingError::InvalidAmount(amount_raw))?;

    let currency = match &overrides.currency {
        Some(code) => code.parse::<CurrencyCode>()?,
        None => defaults.currency,
    };

    let callback_url = overrides
        .callback_url
        .as_deref()
        .or(defaults.callback_url.as_deref())
        .map(checked_callback_url)
        .transpose()?;

    let email = pick(&overrides.email, &defaults.email);
    validate_email(&email)?;

    let guest = overrides.guest.unwrap_or(defaults.guest);

    let segment = FlightSegment {
        departure: FlightEndpoint {
            iata_code: defaults.origin.clone(),
            at: defaults.departure_at,
        },
        arrival: FlightEndpoint {
            iata_code: defaults.destination.clone(),
            at: defaults.arrival_at,
        },
        carrier_code: defaults.carrier_code.clone(),
        number: defaults.flight_number.clone(),
    };

    let passenger = Passenger {
        id: pick(&overrides.passenger_id, &defaults.passenger_id),
        name: PassengerName {
            first_name: pick(&overrides.first_name, &defaults.first_name),
            last_name: pick(&overrides.last_name, &defaults.last_name),
        },
        gender: defaults.gender,
        date_of_birth: defaults.date_of_birth,
        contact: ContactInfo {
            email_address: email.clone(),
            phones: vec![Phone {
                device_type: defaults.device_type,
                country_calling_code: defaults.country_calling_code.clone(),
                number: defaults.phone_number.clone(),
            }],
        },
        documents: Vec::new(),
    };

    let guest_contact_info = guest.then(|| GuestContactInfo {
        email,
        phone: defaults.phone_number.clone(),
        country_code: defaults.country_code.clone(),
        dial_code: defaults.dial_code.clone(),
    });

    Ok(BookingRequest {
        flight_details: FlightDetails {
            id: pick(&overrides.flight_id, &defaults.flight_id),
            price: Price {
                total: defaults.price_total.clone(),
                currency,
            },
            itineraries: vec![Itinerary {
                segments: vec![segment],
            }],
        },
        passenger_details: vec![passenger],
        payment_details: PaymentDetails {
            method: PaymentMethod::Paystack,
            amount,
            currency,
            callback_url,
        },
        is_guest_booking: guest,
        guest_contact_info,
    })
}

/// Parse a callback URL, accepting only absolute http(s) URLs with a host.
///
/// # Errors
///
/// Returns [`BookingError::InvalidCallbackUrl`] if the input does not parse or
/// is not an http(s) URL with a host.
pub fn parse_callback_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| BookingError::InvalidCallbackUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".into()));
    }
    Ok(url)
}

/// Validate a callback URL and hand back the caller's string untouched.
///
/// The parsed [`Url`] is only used for checking; serializing it would
/// normalize host case, default ports and an empty path.
pub(crate) fn checked_callback_url(raw: &str) -> Result<String> {
    parse_callback_url(raw)?;
    Ok(raw.to_string())
}

/// Require a `local@domain` shaped address.
pub(crate) fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(BookingError::InvalidEmail(email.to_string())),
    }
}
