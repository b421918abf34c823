// file: src/logging/logger.rs
// version: 1.0.0
// guid: 147e9e50-f508-47c2-a4c3-225d00cc4f52

//! Logger initialization and configuration

use crate::config::LogFormat;
use crate::error::{Result, ShellError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter for the given flags; `RUST_LOG` wins over `default_level`
pub fn build_filter(verbose: bool, quiet: bool, default_level: &str) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    }
}

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool, default_level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(verbose, quiet, default_level);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| ShellError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Create a scoped logger for operations
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}
