//! gen-secrets - print random secrets for an environment file.

use std::io::Write;

use callback_probe_cli::init_tracing;
use callback_probe_core::SecretSet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let secrets = SecretSet::generate()?;
    tracing::debug!(count = secrets.secrets().len(), "Secrets generated");

    let mut out = std::io::stdout().lock();
    out.write_all(secrets.render().as_bytes())?;
    out.flush()?;

    Ok(())
}
