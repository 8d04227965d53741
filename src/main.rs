#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names
)]

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Select ring explicitly so rustls does not have to guess a
    // process-level CryptoProvider.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();
    let config = app::dispatch::startup_config(&cli.command)?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, &config.observability.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {e}"))?;

    app::dispatch::dispatch(cli, config).await
}

/// `-v` flags win over the configured level.
fn log_level(verbose: u8, configured: &str) -> Level {
    match verbose {
        0 => configured.parse().unwrap_or(Level::WARN),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
