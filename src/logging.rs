//! File logging. The terminal belongs to the UI, so logs only go to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber appending to `path`.
///
/// `RUST_LOG` picks the filter, default `info`.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(format!("logging already initialized: {e}")))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "weather-lookup starting");
    Ok(())
}
