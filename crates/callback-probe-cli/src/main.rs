//! callback-probe - drive the booking backend and payment gateway and report
//! the payment links they hand back.

use std::process::ExitCode;

use clap::Parser;

use callback_probe_cli::{init_tracing, run, Cli, ProbeConfig, Prober};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    // Load configuration from environment
    let config = ProbeConfig::from_env();

    tracing::info!(
        backend = %config.backend_base_url,
        gateway = %config.gateway_base_url,
        gateway_key_configured = %config.gateway_secret_key.is_some(),
        "Probe configuration loaded"
    );

    let prober = Prober::new(config)?;
    let mut out = std::io::stdout().lock();
    let ok = run(&prober, cli.command, &mut out).await?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
