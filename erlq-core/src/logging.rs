//! Structured logging setup
//!
//! Thin wrappers over `tracing-subscriber` so binaries and examples get a
//! consistent format. `RUST_LOG` overrides the requested level, e.g.
//! `RUST_LOG=erlq_core=debug` to watch the capacity scan candidate by
//! candidate.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at the default `info` level.
pub fn init_logging() {
    init_logging_with_level("info")
}

/// Initialize logging with a specific base level ("trace", "debug", "info",
/// "warn", or "error"). `RUST_LOG` takes precedence when set. Safe to call
/// more than once; later calls are ignored.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging();
        init_logging_with_level("debug");
    }
}
