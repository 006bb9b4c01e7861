//! Tracing bootstrap for embedding binaries.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the JSON fmt subscriber, filtered through the environment.
///
/// Safe to call more than once: a second initialisation logs a warning
/// instead of failing.
pub fn init() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
