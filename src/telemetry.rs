//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise `default_filter` is used
/// (typically `ServerConfig::log_level`). Later calls are no-ops.
pub fn init_tracing(default_filter: &str, json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(filter);
        if json {
            registry
                .with(fmt::layer().json().with_target(true))
                .init();
        } else {
            registry.with(fmt::layer().with_target(true)).init();
        }
    });
}
