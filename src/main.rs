//! cpu-monitor: a live CPU usage graph pinned to the Wayland desktop layer.
//!
//! Run with:  `RUST_LOG=info cpu-monitor`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("cpu-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    monitor_wayland::run().map_err(Into::into)
}
