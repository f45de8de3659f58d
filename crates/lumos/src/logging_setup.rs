use anyhow::{Context, Result};
use lumos_core::LogConfig;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
pub fn init(config: &LogConfig) -> Result<()> {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr) // stdout is reserved for --dump and --gen-config
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::debug!("Logging initialized at level: {}", config.level);

    Ok(())
}
