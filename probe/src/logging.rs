//! Tracing subscriber setup.
//!
//! Every dispatched call runs inside an `api_request` span; request and
//! response details are `debug` events beneath it. Call [`init`] once at the
//! top of a test (or let it be called repeatedly) to see them on stderr.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "probe=info";

/// Installs the global subscriber, ignoring an already installed one.
pub fn init() {
    let _ = try_init();
}

/// Installs the global subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`], and
/// writes compact lines to stderr.
///
/// ## Errors
///
/// Fails when a global subscriber is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
}
