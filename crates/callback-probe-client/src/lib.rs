//! HTTP side of callback-probe.
//!
//! Sends one JSON POST per logical intent and classifies the reply. Nothing
//! here retries: the endpoints create bookings and payment sessions.
//!
//! # Example
//!
//! ```no_run
//! use callback_probe_client::{BackendClient, ClientOptions};
//! use callback_probe_core::{build_booking, BookingDefaults, BookingOverrides};
//!
//! # async fn example() -> Result<(), callback_probe_client::ProbeError> {
//! let client = BackendClient::new("http://localhost:8080/api/v1", ClientOptions::default())?;
//!
//! let booking = build_booking(
//!     &BookingDefaults::default(),
//!     &BookingOverrides::new().with_callback_url("http://localhost:3000/flights/booking-confirmation"),
//! )?;
//!
//! let link = client.book(&booking).await?;
//! println!("{} ({})", link.authorization_url, link.reference);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod classify;
mod client;
mod dispatch;
mod error;

pub use classify::{classify_backend, classify_gateway, PaymentLink};
pub use client::{BackendClient, ClientOptions, GatewayClient, BOOKING_PATH, INITIALIZE_PATH};
pub use dispatch::Dispatcher;
pub use error::{ApplicationError, ProbeError};
