//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,mock_upstream=debug";

/// Reads `RUST_LOG` at call time, so `.env` must already be loaded.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// JSON logs on stderr. Stdout is reserved for the per-request markers.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
