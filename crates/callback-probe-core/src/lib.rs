//! Core types for callback-probe.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Booking**: `BookingRequest` and its sections, as the booking backend expects them
//! - **Fixtures**: `BookingDefaults`, the literal test data a probe is built from
//! - **Builder**: `BookingOverrides` and `build_booking`
//! - **Gateway**: `TransactionInit`, the direct transaction-initialization payload
//! - **Secrets**: `SecretSet`, random hex secrets for environment files
//!
//! # Minor units
//!
//! All amounts are integers in the currency's minor unit (kobo for NGN), so
//! `500000` is 5000 NGN.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod booking;
pub mod builder;
pub mod defaults;
pub mod error;
pub mod gateway;
pub mod secrets;

pub use booking::{
    BookingRequest, ContactInfo, CurrencyCode, DeviceType, FlightDetails, FlightEndpoint,
    FlightSegment, Gender, GuestContactInfo, Itinerary, Passenger, PassengerName, PaymentDetails,
    PaymentMethod, Phone, Price,
};
pub use builder::{build_booking, parse_callback_url, BookingOverrides};
pub use defaults::{BookingDefaults, DEFAULT_CALLBACK_URL};
pub use error::{BookingError, Result};
pub use gateway::{TransactionInit, DIRECT_REFERENCE_PREFIX};
pub use secrets::{Secret, SecretSet, SECRET_KINDS};
