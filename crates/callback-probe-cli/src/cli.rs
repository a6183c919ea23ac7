//! Command-line interface.

use clap::{Args, Parser, Subcommand};

use callback_probe_core::BookingOverrides;

use crate::scenarios::DirectRequest;

#[derive(Parser, Debug)]
#[command(name = "callback-probe")]
#[command(about = "Probe the booking backend and payment gateway for callback redirect problems")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create one booking through the backend
    Book(BookArgs),

    /// Initialize a transaction directly with the gateway
    Direct(DirectArgs),

    /// Direct gateway call, then a backend booking with the same callback URL
    Compare {
        /// Callback URL (default: the frontend confirmation page)
        #[arg(long)]
        callback: Option<String>,
    },

    /// One backend booking per callback URL variant, in order
    Variants {
        /// Callback URL to try; repeat for several (default: built-in variants)
        #[arg(long = "callback")]
        callbacks: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Callback URL (default: the frontend confirmation page)
    #[arg(long)]
    pub callback: Option<String>,

    /// Flight offer id
    #[arg(long)]
    pub flight_id: Option<String>,

    /// Passenger id
    #[arg(long)]
    pub passenger_id: Option<String>,

    /// Contact email
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Amount in minor units (e.g. kobo)
    #[arg(long, short = 'a')]
    pub amount: Option<u64>,

    /// Three-letter currency code
    #[arg(long, short = 'c')]
    pub currency: Option<String>,

    /// Book as a signed-in member instead of a guest
    #[arg(long)]
    pub member: bool,
}

impl BookArgs {
    /// Booking overrides for these arguments.
    #[must_use]
    pub fn overrides(&self) -> BookingOverrides {
        BookingOverrides {
            flight_id: self.flight_id.clone(),
            passenger_id: self.passenger_id.clone(),
            email: self.email.clone(),
            callback_url: self.callback.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            guest: self.member.then_some(false),
            ..BookingOverrides::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct DirectArgs {
    /// Callback URL (default: the frontend confirmation page)
    #[arg(long)]
    pub callback: Option<String>,

    /// Customer email
    #[arg(long, short = 'e', default_value = "direct.test@example.com")]
    pub email: String,

    /// Amount in minor units (e.g. kobo)
    #[arg(long, short = 'a', default_value = "500000")]
    pub amount: u64,

    /// Three-letter currency code
    #[arg(long, short = 'c', default_value = "NGN")]
    pub currency: String,
}

impl From<DirectArgs> for DirectRequest {
    fn from(args: DirectArgs) -> Self {
        Self {
            email: args.email,
            amount: args.amount,
            currency: args.currency,
            callback_url: args.callback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn book_args_map_to_overrides() {
        let cli = Cli::parse_from([
            "callback-probe",
            "book",
            "--callback",
            "http://127.0.0.1:3000/flights/booking-confirmation",
            "--email",
            "ops@example.com",
            "--member",
        ]);
        let Command::Book(args) = cli.command else {
            panic!("expected book command");
        };
        let overrides = args.overrides();
        assert_eq!(
            overrides.callback_url.as_deref(),
            Some("http://127.0.0.1:3000/flights/booking-confirmation")
        );
        assert_eq!(overrides.email.as_deref(), Some("ops@example.com"));
        assert_eq!(overrides.guest, Some(false));
        assert!(overrides.amount.is_none());
    }

    #[test]
    fn guest_is_default() {
        let cli = Cli::parse_from(["callback-probe", "book"]);
        let Command::Book(args) = cli.command else {
            panic!("expected book command");
        };
        assert!(args.overrides().guest.is_none());
    }

    #[test]
    fn direct_defaults() {
        let cli = Cli::parse_from(["callback-probe", "direct"]);
        let Command::Direct(args) = cli.command else {
            panic!("expected direct command");
        };
        assert_eq!(DirectRequest::from(args), DirectRequest::default());
    }

    #[test]
    fn variants_collect_repeated_callbacks() {
        let cli = Cli::parse_from([
            "callback-probe",
            "variants",
            "--callback",
            "http://a.test/cb",
            "--callback",
            "http://b.test/cb",
        ]);
        let Command::Variants { callbacks } = cli.command else {
            panic!("expected variants command");
        };
        assert_eq!(callbacks, ["http://a.test/cb", "http://b.test/cb"]);
    }
}
