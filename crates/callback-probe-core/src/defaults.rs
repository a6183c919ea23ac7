//! Fixture data that probe bookings are built from.
//!
//! Every literal a probe sends lives here so the builder never has to be
//! edited to vary the test data.

use chrono::{NaiveDate, NaiveDateTime};

use crate::booking::{CurrencyCode, DeviceType, Gender};

/// Callback URL the frontend serves booking confirmations on.
pub const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/flights/booking-confirmation";

/// Literal values used for every field a caller does not override.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDefaults {
    /// Flight offer id.
    pub flight_id: String,
    /// Quoted total, decimal string in major units.
    pub price_total: String,
    /// Currency for both the quote and the payment.
    pub currency: CurrencyCode,
    /// Departure airport.
    pub origin: String,
    /// Arrival airport.
    pub destination: String,
    /// Departure local time.
    pub departure_at: NaiveDateTime,
    /// Arrival local time.
    pub arrival_at: NaiveDateTime,
    /// Carrier code.
    pub carrier_code: String,
    /// Flight number.
    pub flight_number: String,
    /// Passenger id.
    pub passenger_id: String,
    /// Passenger given name.
    pub first_name: String,
    /// Passenger family name.
    pub last_name: String,
    /// Passenger gender.
    pub gender: Gender,
    /// Passenger date of birth.
    pub date_of_birth: NaiveDate,
    /// Contact email, used for both passenger and guest contact.
    pub email: String,
    /// Phone device type.
    pub device_type: DeviceType,
    /// Country calling code without `+`.
    pub country_calling_code: String,
    /// Phone number.
    pub phone_number: String,
    /// Guest contact country.
    pub country_code: String,
    /// Guest contact dialing code.
    pub dial_code: String,
    /// Payment amount in minor units.
    pub amount: u64,
    /// Callback URL, if any.
    pub callback_url: Option<String>,
    /// Whether bookings are guest bookings.
    pub guest: bool,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            flight_id: "callback-probe".into(),
            price_total: "5000".into(),
            currency: CurrencyCode::NGN,
            origin: "LOS".into(),
            destination: "ABV".into(),
            departure_at: fixed_datetime(2024, 2, 15, 10, 0),
            arrival_at: fixed_datetime(2024, 2, 15, 12, 0),
            carrier_code: "AA".into(),
            flight_number: "123".into(),
            passenger_id: "passenger-callback-probe".into(),
            first_name: "Callback".into(),
            last_name: "Probe".into(),
            gender: Gender::Male,
            date_of_birth: fixed_date(1990, 1, 1),
            email: "callback.probe@example.com".into(),
            device_type: DeviceType::Mobile,
            country_calling_code: "234".into(),
            phone_number: "8012345678".into(),
            country_code: "NG".into(),
            dial_code: "+234".into(),
            amount: 10_000,
            callback_url: Some(DEFAULT_CALLBACK_URL.into()),
            guest: true,
        }
    }
}

impl BookingDefaults {
    /// Callback URL variants swept when chasing a redirect problem.
    ///
    /// The `https://localhost` entry is expected to fail in the browser; it is
    /// there to show whether the backend forwards the scheme untouched.
    #[must_use]
    pub fn callback_variants() -> Vec<String> {
        vec![
            DEFAULT_CALLBACK_URL.to_string(),
            "http://127.0.0.1:3000/flights/booking-confirmation".to_string(),
            "https://localhost:3000/flights/booking-confirmation".to_string(),
        ]
    }
}

fn fixed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    // INVARIANT: only called with literal calendar dates from this module.
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date is a valid calendar date")
}

fn fixed_datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    // INVARIANT: only called with literal times from this module.
    fixed_date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("fixture time is a valid wall-clock time")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_schedule() {
        let defaults = BookingDefaults::default();
        assert_eq!(
            defaults.departure_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2024-02-15T10:00:00"
        );
        assert!(defaults.arrival_at > defaults.departure_at);
        assert_eq!(defaults.currency.as_str(), "NGN");
        assert!(defaults.guest);
    }

    #[test]
    fn callback_variants_start_with_default() {
        let variants = BookingDefaults::callback_variants();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0], DEFAULT_CALLBACK_URL);
    }
}
