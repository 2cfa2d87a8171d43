#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use aria_config::TelemetryConfig;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// The filter comes from `RUST_LOG` when set, otherwise from the
/// configured log level. Call once at process start.
pub fn init(config: Option<&TelemetryConfig>, default_level: &str) -> anyhow::Result<()> {
    let level = config.map_or(default_level, |c| c.log_level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if config.is_some_and(|c| c.json_logs) {
        builder.json().try_init().map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    }

    Ok(())
}
