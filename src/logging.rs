//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

fn default_directives(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("yatra={level},tower_http={level}")
}

/// `RUST_LOG` wins, then `--verbose`, then the configured level.
fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config, verbose)))
}

/// Install the global subscriber in pretty or JSON format, writing to stderr
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
