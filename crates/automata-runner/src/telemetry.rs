//! Logging setup for the runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout carries only frames.
pub fn init_telemetry(json: bool) -> Result<()> {
    let plain = (!json).then(|| fmt::layer().with_target(true).with_writer(std::io::stderr));
    let structured = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,automata_runner=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(structured)
        .try_init()?;

    info!("Logging initialized");
    Ok(())
}
