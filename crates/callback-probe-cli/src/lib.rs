//! Operator tools for debugging payment callback redirects.
//!
//! The `callback-probe` binary drives the booking backend and the payment
//! gateway and prints what came back; `gen-secrets` prints fresh secrets for
//! an environment file.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod scenarios;

pub use cli::{Cli, Command};
pub use config::ProbeConfig;
pub use scenarios::{DirectRequest, Prober};

use std::io::{self, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber. Logs go to stderr so the report on stdout
/// stays clean.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,callback_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Run one command and report whether every probe succeeded.
///
/// # Errors
///
/// Returns an error only if writing the report fails.
pub async fn run<W: Write>(prober: &Prober, command: Command, out: &mut W) -> io::Result<bool> {
    match command {
        Command::Book(args) => prober.book(out, args.overrides()).await,
        Command::Direct(args) => prober.direct(out, &args.into()).await,
        Command::Compare { callback } => prober.compare(out, callback).await,
        Command::Variants { callbacks } => prober.variants(out, callbacks).await,
    }
}
