//! Tracing setup.
//!
//! The terminal is in raw mode on the alternate screen while playing, so logs
//! only ever go to a file.

use std::path::Path;

/// Install a file-backed `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter. A second call leaves the first subscriber in place.
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
