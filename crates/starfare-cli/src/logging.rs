//! Logging initialization and configuration.
//!
//! Diagnostics, progress and per-query warnings go to stderr through
//! `tracing`; the report itself goes to stdout.

use anyhow::Result;
use colored::control as color_control;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter, e.g. `debug` or
/// `starfare_core=debug`.
pub const LOG_ENV: &str = "STARFARE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialize the logging subsystem.
///
/// The filter comes from [`LOG_ENV`] and defaults to `info`. Color is disabled
/// when `NO_COLOR` is set.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if std::env::var_os("NO_COLOR").is_some() {
        color_control::set_override(false);
    }
    Ok(())
}
