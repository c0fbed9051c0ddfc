//! Tracing initialization.
//!
//! Usage:
//!   showroom --debug ...                # Debug logging to stderr
//!   RUST_LOG=showroom_perf=debug ...    # Fine-grained filter

use anyhow::Result;
use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(debug: bool) -> Result<()> {
    let fallback = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
