//! Tracing setup for the `folio` binary
//!
//! Configuration is read before the configured subscriber can exist, so
//! config resolution runs under a temporary stderr subscriber. Its
//! fallback warnings (missing file, env overrides) are never lost.

use anyhow::{Context, Result};
use folio_common::config::{LoggingConfig, TomlConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used until the configured level is known
const BOOTSTRAP_FILTER: &str = "warn,folio=info";

/// Stderr subscriber honouring `RUST_LOG`, used while loading config
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}

/// Resolve configuration with the bootstrap subscriber active
pub fn resolve_config(cli_arg: Option<&Path>) -> folio_common::Result<TomlConfig> {
    resolve_config_with(cli_arg, bootstrap_subscriber())
}

/// Resolve configuration, reporting to `subscriber` for the duration
pub fn resolve_config_with<S>(cli_arg: Option<&Path>, subscriber: S) -> folio_common::Result<TomlConfig>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::with_default(subscriber, || TomlConfig::resolve(cli_arg))
}

/// Install the global subscriber: stderr, or the configured log file
///
/// `RUST_LOG` wins over the configured level.
pub fn init(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,folio={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
