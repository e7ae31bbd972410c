//! File logging. The terminal belongs to the UI, so everything goes to
//! `cine.log` in the config directory; follow it with `tail -f`.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins; otherwise `info`, or
/// `debug` with `--verbose`.
pub fn init(log_path: &Path, verbose: bool) -> Result<()> {
    let directory = log_path
        .parent()
        .with_context(|| format!("Log path has no parent directory: {}", log_path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let file_name = log_path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", log_path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Tracing subscriber already initialized: {e}"))
}
