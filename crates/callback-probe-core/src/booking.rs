//! Booking request payload.
//!
//! The shapes here mirror what `POST /products/flights/book` accepts. Keys are
//! camelCase on the wire, except `paymentDetails.callback_url`.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::error::BookingError;

/// A three-letter ISO 4217 currency code, stored uppercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Nigerian naira, the probe default.
    pub const NGN: Self = Self(*b"NGN");

    /// Return the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for CurrencyCode {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(BookingError::InvalidCurrency(s.to_string()));
        }
        let mut code = [0u8; 3];
        for (slot, b) in code.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self(code))
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Complete booking request sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Flight being booked.
    pub flight_details: FlightDetails,
    /// Travellers, in order. Never empty.
    pub passenger_details: Vec<Passenger>,
    /// How the booking is paid for.
    pub payment_details: PaymentDetails,
    /// Whether the booking is made without an account.
    pub is_guest_booking: bool,
    /// Contact for guest bookings; present iff `is_guest_booking`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub guest_contact_info: Option<GuestContactInfo>,
}

/// Flight section of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    /// Offer identifier.
    pub id: String,
    /// Quoted total price.
    pub price: Price,
    /// Itineraries; probes always send exactly one.
    pub itineraries: Vec<Itinerary>,
}

/// Quoted price. `total` is a decimal string in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Total, e.g. `"5000"`.
    pub total: String,
    /// Currency of `total`.
    pub currency: CurrencyCode,
}

/// One itinerary: an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Segments in travel order.
    pub segments: Vec<FlightSegment>,
}

/// A single flight leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    /// Where the leg departs.
    pub departure: FlightEndpoint,
    /// Where the leg arrives.
    pub arrival: FlightEndpoint,
    /// Marketing carrier, e.g. `"AA"`.
    pub carrier_code: String,
    /// Flight number without the carrier prefix.
    pub number: String,
}

/// Airport and local time at one end of a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    /// IATA airport code.
    pub iata_code: String,
    /// Local date-time, serialized as `YYYY-MM-DDTHH:MM:SS`.
    pub at: NaiveDateTime,
}

/// A traveller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    /// Passenger identifier.
    pub id: String,
    /// Passenger name.
    pub name: PassengerName,
    /// Gender as required by the airline.
    pub gender: Gender,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Contact details.
    pub contact: ContactInfo,
    /// Travel documents; probes send none.
    pub documents: Vec<serde_json::Value>,
}

/// Given and family name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerName {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Passenger gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// `"MALE"`
    Male,
    /// `"FEMALE"`
    Female,
}

/// Passenger contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    /// Email address.
    pub email_address: String,
    /// Phone numbers, in order of preference.
    pub phones: Vec<Phone>,
}

/// A phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    /// Kind of device.
    pub device_type: DeviceType,
    /// Country calling code without the `+`.
    pub country_calling_code: String,
    /// Subscriber number.
    pub number: String,
}

/// Phone device kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    /// `"MOBILE"`
    Mobile,
    /// `"LANDLINE"`
    Landline,
}

/// Payment section of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Payment provider.
    pub method: PaymentMethod,
    /// Amount in minor units.
    pub amount: NonZeroU64,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// Where the gateway should send the user after payment, exactly as
    /// supplied.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub callback_url: Option<String>,
}

/// Payment provider tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// `"paystack"`
    Paystack,
}

/// Contact for a guest booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestContactInfo {
    /// Email address.
    pub email: String,
    /// Phone number without country prefix.
    pub phone: String,
    /// ISO 3166 country code, e.g. `"NG"`.
    pub country_code: String,
    /// Dialing code with `+`, e.g. `"+234"`.
    pub dial_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_code_normalizes_case() {
        let code: CurrencyCode = "ngn".parse().unwrap();
        assert_eq!(code, CurrencyCode::NGN);
        assert_eq!(code.to_string(), "NGN");
    }

    #[test]
    fn currency_code_rejects_bad_input() {
        assert!("NG".parse::<CurrencyCode>().is_err());
        assert!("NGNN".parse::<CurrencyCode>().is_err());
        assert!("N1N".parse::<CurrencyCode>().is_err());
        assert!("".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn currency_code_serde_rejects_invalid() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"US\"");
        assert!(result.is_err());
        let ok: CurrencyCode = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(ok.as_str(), "USD");
    }

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), "MALE");
        assert_eq!(serde_json::to_value(DeviceType::Mobile).unwrap(), "MOBILE");
        assert_eq!(
            serde_json::to_value(PaymentMethod::Paystack).unwrap(),
            "paystack"
        );
    }
}
