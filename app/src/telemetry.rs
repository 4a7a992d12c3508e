//! Structured logging setup.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once: when a global subscriber already exists the
/// failure is logged through it and the call returns `false`.
pub fn init_tracing() -> bool {
    match fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "tracing init failed");
            false
        }
    }
}
