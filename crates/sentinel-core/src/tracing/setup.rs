//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SENTINEL_LOG";

/// Initialize the sentinel tracing/logging system.
///
/// Reads `SENTINEL_LOG` for per-crate log levels, e.g.
/// `SENTINEL_LOG=sentinel_engine=debug,sentinel_storage=warn`.
///
/// Falls back to `info` for the sentinel crates if `SENTINEL_LOG` is not set
/// or is invalid. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            EnvFilter::new(
                "sentinel_core=info,sentinel_storage=info,sentinel_engine=info,\
                 sentinel_gateway=info,sentinel=info",
            )
        });

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
